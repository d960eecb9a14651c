use crate::data::TsData;
use crate::interval::TimeInterval;
use crate::position::TimePosition;
use crate::store::TimeSeries;
use std::mem::replace;

/// An iterator that yields each position from the start through the end
/// (inclusive), stepping by the interval.
#[derive(Clone, Copy, Debug)]
pub struct PositionRange {
    pub next: TimePosition,
    pub end: TimePosition,
    pub interval: TimeInterval,
}

impl PositionRange {
    pub fn new(start: TimePosition, end: TimePosition, interval: TimeInterval) -> PositionRange {
        PositionRange {
            next: start,
            end,
            interval,
        }
    }
}

impl Iterator for PositionRange {
    type Item = TimePosition;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next <= self.end {
            let mut next = self.next;
            next.add_interval(self.interval.base, self.interval.mult as i32);
            Some(replace(&mut self.next, next))
        } else {
            None
        }
    }
}

/// Walks a time series over its period of record, or a sub-period, yielding
/// one data point per interval. Positions outside the period yield the
/// missing value, which is how chart code draws gaps.
#[derive(Debug)]
pub struct TsIterator<'a> {
    series: &'a dyn TimeSeries,
    range: Option<PositionRange>,
}

impl<'a> TsIterator<'a> {
    /// Iterate the full period of record; empty if the period is not set.
    pub fn new(series: &'a dyn TimeSeries) -> TsIterator<'a> {
        let range = match (series.date1(), series.date2()) {
            (Some(start), Some(end)) => Some(PositionRange::new(start, end, series.interval())),
            _ => None,
        };
        TsIterator { series, range }
    }

    /// Iterate from `start` through `end`, converted to the series precision.
    pub fn between(series: &'a dyn TimeSeries, start: TimePosition, end: TimePosition) -> TsIterator<'a> {
        let interval = series.interval();
        let precision = interval.base.precision();
        TsIterator {
            series,
            range: Some(PositionRange::new(
                start.with_precision(precision),
                end.with_precision(precision),
                interval,
            )),
        }
    }
}

impl Iterator for TsIterator<'_> {
    type Item = TsData;
    fn next(&mut self) -> Option<Self::Item> {
        let position = self.range.as_mut()?.next()?;
        Some(self.series.get_data_point(&position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::IntervalBase;
    use crate::store::{DayTs, MonthTs};

    fn day(year: i32, month: u32, day: u32) -> TimePosition {
        TimePosition::from_ymd(year, month, day).unwrap()
    }

    #[test]
    fn test_position_range_iteration() {
        let range = PositionRange::new(day(2020, 1, 1), day(2020, 2, 1), IntervalBase::Day.into());
        let positions: Vec<TimePosition> = range.collect();
        assert_eq!(positions.len(), 32);
        assert_eq!(positions[0], day(2020, 1, 1));
        assert_eq!(positions[31], day(2020, 2, 1));
    }

    #[test]
    fn test_position_range_single_and_empty() {
        let single = PositionRange::new(day(2022, 3, 15), day(2022, 3, 15), IntervalBase::Day.into());
        assert_eq!(single.count(), 1);
        let empty = PositionRange::new(day(2022, 3, 15), day(2022, 3, 14), IntervalBase::Day.into());
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_position_range_months_across_years() {
        let start = TimePosition::from_ym(2019, 10).unwrap();
        let end = TimePosition::from_ym(2020, 9).unwrap();
        let months: Vec<String> = PositionRange::new(start, end, IntervalBase::Month.into())
            .map(|p| p.to_string())
            .collect();
        assert_eq!(months.len(), 12);
        assert_eq!(months[3], "2020-01");
    }

    #[test]
    fn test_ts_iterator_over_period() {
        let mut series = DayTs::new();
        series.set_period(day(2020, 2, 27), day(2020, 3, 2));
        series.allocate(None).unwrap();
        series.set_data_value(&day(2020, 2, 29), 29.0);

        let points: Vec<TsData> = TsIterator::new(&series).collect();
        assert_eq!(points.len(), 5);
        assert_eq!(points[2].date, day(2020, 2, 29));
        assert_eq!(points[2].value, 29.0);
        assert!(series.is_data_missing(points[3].value));
    }

    #[test]
    fn test_ts_iterator_between_pads_with_missing() {
        let mut series = MonthTs::new();
        series.set_period(
            TimePosition::from_ym(2000, 1).unwrap(),
            TimePosition::from_ym(2000, 3).unwrap(),
        );
        series.allocate(Some(1.0)).unwrap();
        let values: Vec<f64> = TsIterator::between(&series, day(1999, 12, 5), day(2000, 4, 1))
            .map(|point| point.value)
            .collect();
        assert_eq!(values, vec![-999.0, 1.0, 1.0, 1.0, -999.0]);
    }

    #[test]
    fn test_ts_iterator_without_period_is_empty() {
        let series = DayTs::new();
        assert_eq!(TsIterator::new(&series).count(), 0);
    }
}
