//! Derived computations over regular time series.
//!
//! This crate turns allocated stores into forms suitable for charting and
//! tables: value limits, annual statistics and gap-filled series.

pub mod years;

/// Linear interpolation for filling runs of missing values.
pub mod fill {
    use log::debug;
    use rts_core::date_range::PositionRange;
    use rts_core::position::TimePosition;
    use rts_core::store::TimeSeries;

    /// Options for [`fill_interpolate`].
    #[derive(Debug, Clone, Default)]
    pub struct FillOptions {
        /// Longest run of missing values to fill; longer runs are left as is.
        pub max_gap: Option<usize>,
        /// Flag applied to each filled value.
        pub flag: Option<String>,
    }

    /// A known value bounding a gap.
    #[derive(Debug, Clone, Copy)]
    struct Anchor {
        index: usize,
        value: f64,
    }

    /// Linearly interpolate between two anchors, returning the values for
    /// the positions strictly between them.
    fn interpolate_pair(start: Anchor, end: Anchor) -> Vec<f64> {
        let steps = end.index - start.index;
        let slope = (end.value - start.value) / steps as f64;
        (1..steps)
            .map(|i| start.value + slope * i as f64)
            .collect()
    }

    /// Fill interior runs of missing values by linear interpolation between
    /// the values on either side. Missing values before the first or after
    /// the last value are left missing. Returns the number of values filled.
    pub fn fill_interpolate(series: &mut dyn TimeSeries, options: &FillOptions) -> usize {
        let (Some(start), Some(end)) = (series.date1(), series.date2()) else {
            return 0;
        };
        if !series.has_data() {
            return 0;
        }
        let positions: Vec<TimePosition> =
            PositionRange::new(start, end, series.interval()).collect();

        let mut filled = 0;
        let mut previous: Option<Anchor> = None;
        for (index, position) in positions.iter().enumerate() {
            let value = series.get_data_value(position);
            if series.is_data_missing(value) {
                continue;
            }
            let current = Anchor { index, value };
            if let Some(anchor) = previous {
                let gap = index - anchor.index - 1;
                let fits = options.max_gap.map_or(true, |max| gap <= max);
                if gap > 0 && fits {
                    let values = interpolate_pair(anchor, current);
                    let gap_positions = &positions[anchor.index + 1..index];
                    for (position, value) in gap_positions.iter().zip(values) {
                        match &options.flag {
                            Some(flag) => series.set_data_value_with_flag(position, value, flag),
                            None => series.set_data_value(position, value),
                        }
                    }
                    filled += gap;
                }
            }
            previous = Some(current);
        }

        if filled > 0 {
            debug!("Filled {filled} missing values by linear interpolation");
            series
                .descriptor_mut()
                .add_to_genesis(&format!("Filled {filled} missing values by linear interpolation"));
        }
        filled
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rts_core::store::{DayTs, MonthTs};

        fn day(year: i32, month: u32, day: u32) -> TimePosition {
            TimePosition::from_ymd(year, month, day).unwrap()
        }

        fn day_series(values: &[(u32, f64)]) -> DayTs {
            let mut series = DayTs::new();
            series.set_period(day(2022, 1, 1), day(2022, 1, 10));
            series.allocate(None).unwrap();
            for (d, value) in values {
                series.set_data_value(&day(2022, 1, *d), *value);
            }
            series
        }

        #[test]
        fn test_fill_interpolate_basic() {
            let mut series = day_series(&[(1, 100.0), (2, 110.0), (5, 140.0)]);
            let filled = fill_interpolate(&mut series, &FillOptions::default());
            assert_eq!(filled, 2);
            assert_eq!(series.get_data_value(&day(2022, 1, 3)), 120.0);
            assert_eq!(series.get_data_value(&day(2022, 1, 4)), 130.0);
            // trailing values stay missing
            assert_eq!(series.get_data_value(&day(2022, 1, 6)), -999.0);
            assert_eq!(series.descriptor().genesis().len(), 1);
        }

        #[test]
        fn test_fill_respects_max_gap() {
            let mut series = day_series(&[(1, 0.0), (3, 2.0), (8, 7.0)]);
            let options = FillOptions {
                max_gap: Some(2),
                flag: None,
            };
            assert_eq!(fill_interpolate(&mut series, &options), 1);
            assert_eq!(series.get_data_value(&day(2022, 1, 2)), 1.0);
            assert_eq!(series.get_data_value(&day(2022, 1, 5)), -999.0);
        }

        #[test]
        fn test_fill_flags_filled_values() {
            let mut series = MonthTs::new();
            series.set_period(
                TimePosition::from_ym(2000, 1).unwrap(),
                TimePosition::from_ym(2000, 4).unwrap(),
            );
            series.allocate(None).unwrap();
            series.set_data_value(&TimePosition::from_ym(2000, 1).unwrap(), 1.0);
            series.set_data_value(&TimePosition::from_ym(2000, 4).unwrap(), 4.0);
            let options = FillOptions {
                max_gap: None,
                flag: Some("I".to_string()),
            };
            assert_eq!(fill_interpolate(&mut series, &options), 2);
            let point = series.get_data_point(&TimePosition::from_ym(2000, 3).unwrap());
            assert_eq!(point.value, 3.0);
            assert_eq!(point.flag, "I");
            let untouched = series.get_data_point(&TimePosition::from_ym(2000, 1).unwrap());
            assert_eq!(untouched.flag, "");
        }

        #[test]
        fn test_fill_unallocated_is_noop() {
            let mut series = DayTs::new();
            assert_eq!(fill_interpolate(&mut series, &FillOptions::default()), 0);
        }
    }
}

/// Minimum, maximum and summary counts over a period.
pub mod limits {
    use rts_core::date_range::TsIterator;
    use rts_core::position::TimePosition;
    use rts_core::store::TimeSeries;
    use serde::Serialize;

    /// Data limits for a time series. Value fields are `None` when the
    /// period holds no values.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct TsLimits {
        pub min_value: Option<f64>,
        pub min_date: Option<TimePosition>,
        pub max_value: Option<f64>,
        pub max_date: Option<TimePosition>,
        pub sum: f64,
        pub mean: Option<f64>,
        pub non_missing_count: usize,
        pub missing_count: usize,
        /// First position holding a value.
        pub non_missing_date1: Option<TimePosition>,
        /// Last position holding a value.
        pub non_missing_date2: Option<TimePosition>,
    }

    impl TsLimits {
        fn add(&mut self, date: TimePosition, value: f64) {
            if self.min_value.map_or(true, |min| value < min) {
                self.min_value = Some(value);
                self.min_date = Some(date);
            }
            if self.max_value.map_or(true, |max| value > max) {
                self.max_value = Some(value);
                self.max_date = Some(date);
            }
            if self.non_missing_date1.is_none() {
                self.non_missing_date1 = Some(date);
            }
            self.non_missing_date2 = Some(date);
            self.sum += value;
            self.non_missing_count += 1;
        }
    }

    fn accumulate(series: &dyn TimeSeries, points: TsIterator<'_>) -> TsLimits {
        let mut limits = TsLimits::default();
        for point in points {
            if series.is_data_missing(point.value) {
                limits.missing_count += 1;
            } else {
                limits.add(point.date, point.value);
            }
        }
        if limits.non_missing_count > 0 {
            limits.mean = Some(limits.sum / limits.non_missing_count as f64);
        }
        limits
    }

    /// Limits over the full period of record.
    pub fn compute_limits(series: &dyn TimeSeries) -> TsLimits {
        accumulate(series, TsIterator::new(series))
    }

    /// Limits over `start` through `end`.
    pub fn compute_limits_between(
        series: &dyn TimeSeries,
        start: TimePosition,
        end: TimePosition,
    ) -> TsLimits {
        accumulate(series, TsIterator::between(series, start, end))
    }

    /// Compute limits over the full period and clear the dirty flag.
    pub fn refresh_limits(series: &mut dyn TimeSeries) -> TsLimits {
        let limits = compute_limits(series);
        series.descriptor_mut().set_dirty(false);
        limits
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rts_core::store::DayTs;

        fn day(year: i32, month: u32, day: u32) -> TimePosition {
            TimePosition::from_ymd(year, month, day).unwrap()
        }

        #[test]
        fn test_compute_limits() {
            let mut series = DayTs::new();
            series.set_period(day(2021, 1, 1), day(2021, 1, 10));
            series.allocate(None).unwrap();
            series.set_data_value(&day(2021, 1, 3), 5.0);
            series.set_data_value(&day(2021, 1, 4), -2.0);
            series.set_data_value(&day(2021, 1, 8), 9.0);

            let limits = refresh_limits(&mut series);
            assert!(!series.descriptor().is_dirty());
            assert_eq!(limits.min_value, Some(-2.0));
            assert_eq!(limits.min_date, Some(day(2021, 1, 4)));
            assert_eq!(limits.max_value, Some(9.0));
            assert_eq!(limits.max_date, Some(day(2021, 1, 8)));
            assert_eq!(limits.sum, 12.0);
            assert_eq!(limits.mean, Some(4.0));
            assert_eq!(limits.non_missing_count, 3);
            assert_eq!(limits.missing_count, 7);
            assert_eq!(limits.non_missing_date1, Some(day(2021, 1, 3)));
            assert_eq!(limits.non_missing_date2, Some(day(2021, 1, 8)));

            let partial = compute_limits_between(&series, day(2021, 1, 1), day(2021, 1, 3));
            assert_eq!(partial.max_value, Some(5.0));
            assert_eq!(partial.missing_count, 2);
        }

        #[test]
        fn test_limits_of_all_missing_series() {
            let mut series = DayTs::new();
            series.set_period(day(2021, 1, 1), day(2021, 1, 2));
            series.allocate(None).unwrap();
            let limits = compute_limits(&series);
            assert_eq!(limits.min_value, None);
            assert_eq!(limits.mean, None);
            assert_eq!(limits.missing_count, 2);
        }
    }
}
