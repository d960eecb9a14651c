use rts_core::date_range::PositionRange;
use rts_core::error::TsError;
use rts_core::interval::{IntervalBase, TimeInterval};
use rts_core::position::TimePosition;
use rts_core::store::{new_series, DayTs, TimeSeries};

fn allocated(interval: &str, start: &str, end: &str) -> Box<dyn TimeSeries> {
    let mut series = new_series(TimeInterval::parse(interval).unwrap()).unwrap();
    series.set_period(
        TimePosition::parse(start).unwrap(),
        TimePosition::parse(end).unwrap(),
    );
    series.allocate(None).unwrap();
    series
}

fn positions(series: &dyn TimeSeries) -> Vec<TimePosition> {
    PositionRange::new(series.date1().unwrap(), series.date2().unwrap(), series.interval()).collect()
}

#[test]
fn test_allocated_period_is_all_missing() {
    for (interval, start, end) in [
        ("Hour", "2020-02-28 20", "2020-03-01 03"),
        ("Day", "2019-12-15", "2020-03-10"),
        ("Month", "1999-10", "2001-09"),
        ("Year", "1950", "1960"),
    ] {
        let series = allocated(interval, start, end);
        assert!(series.has_data(), "{interval}");
        let all = positions(series.as_ref());
        assert_eq!(all.len(), series.descriptor().data_size(), "{interval}");
        for position in all {
            let value = series.get_data_value(&position);
            assert!(series.is_data_missing(value), "{interval} {position}");
        }
    }
}

#[test]
fn test_every_position_round_trips() {
    for (interval, start, end) in [
        ("Hour", "2023-12-31 00", "2024-01-02 23"),
        ("Day", "2023-11-20", "2024-03-05"),
        ("Month", "2019-06", "2021-02"),
        ("Year", "1900", "2000"),
    ] {
        let mut series = allocated(interval, start, end);
        let all = positions(series.as_ref());
        for (i, position) in all.iter().enumerate() {
            series.set_data_value(position, i as f64);
        }
        for (i, position) in all.iter().enumerate() {
            assert_eq!(series.get_data_value(position), i as f64, "{interval} {position}");
        }
    }
}

#[test]
fn test_writes_outside_period_have_no_effect() {
    let mut series = allocated("Day", "2021-01-15", "2021-03-10");
    let inside = positions(series.as_ref());
    for (i, position) in inside.iter().enumerate() {
        series.set_data_value(position, i as f64);
    }
    for text in ["2021-01-14", "2021-01-01", "2021-03-11", "2021-03-31", "2022-01-15"] {
        let outside = TimePosition::parse(text).unwrap();
        series.set_data_value(&outside, 1_000.0);
        assert_eq!(series.get_data_value(&outside), -999.0, "{text}");
    }
    for (i, position) in inside.iter().enumerate() {
        assert_eq!(series.get_data_value(position), i as f64);
    }
}

#[test]
fn test_day_store_sizing() {
    let mut series = DayTs::new();
    series.set_period(
        TimePosition::from_ymd(2021, 1, 15).unwrap(),
        TimePosition::from_ymd(2021, 3, 10).unwrap(),
    );
    series.allocate(None).unwrap();
    assert_eq!(series.row_count(), 3);
    let lengths: Vec<usize> = (0..series.row_count()).map(|row| series.row_length(row)).collect();
    assert_eq!(lengths, vec![31, 28, 31]);

    let start = TimePosition::from_ymd(2020, 1, 1).unwrap();
    let end = TimePosition::from_ymd(2020, 2, 1).unwrap();
    let mut visited = 0;
    let mut position = start;
    while position <= end {
        visited += 1;
        position.add_interval(IntervalBase::Day, 1);
    }
    assert_eq!(visited, 32);
    assert_eq!(series.calculate_data_size(&start, &end), 32);
}

#[test]
fn test_month_store_scenario() {
    let mut series = allocated("Month", "2000-01", "2000-12");
    series.set_data_value(&TimePosition::parse("2000-06").unwrap(), 42.0);
    assert_eq!(series.get_data_value(&TimePosition::parse("2000-06").unwrap()), 42.0);
    assert_eq!(series.get_data_value(&TimePosition::parse("1999-12").unwrap()), -999.0);
}

#[test]
fn test_day_store_rejects_multiplier() {
    let mut series = DayTs::new();
    series.set_period(
        TimePosition::from_ymd(2020, 1, 1).unwrap(),
        TimePosition::from_ymd(2020, 1, 31).unwrap(),
    );
    series.descriptor_mut().set_interval_mult(2);
    assert_eq!(
        series.allocate(None),
        Err(TsError::UnsupportedInterval {
            base: IntervalBase::Day,
            mult: 2
        })
    );
}
