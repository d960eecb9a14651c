use rts_core::date_range::TsIterator;
use rts_core::position::TimePosition;
use rts_core::store::TimeSeries;
use rts_utils::dates::YearType;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Statistics computed for a single year of a year type: highest/lowest
/// values and their dates. Only years holding at least one value appear.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStatistics {
    pub year: i32,
    pub year_type: YearType,
    pub date_lowest: TimePosition,
    pub date_highest: TimePosition,
    pub lowest_value: f64,
    pub highest_value: f64,
    pub total: f64,
    pub count: usize,
    pub missing_count: usize,
}

impl YearStatistics {
    fn new(year: i32, year_type: YearType, date: TimePosition, value: f64) -> YearStatistics {
        YearStatistics {
            year,
            year_type,
            date_lowest: date,
            date_highest: date,
            lowest_value: value,
            highest_value: value,
            total: value,
            count: 1,
            missing_count: 0,
        }
    }

    fn add(&mut self, date: TimePosition, value: f64) {
        if value < self.lowest_value {
            self.lowest_value = value;
            self.date_lowest = date;
        }
        if value > self.highest_value {
            self.highest_value = value;
            self.date_highest = date;
        }
        self.total += value;
        self.count += 1;
    }

    pub fn mean(&self) -> f64 {
        self.total / self.count as f64
    }

    /// Returns true if this is the driest year (lowest minimum) in a collection.
    pub fn is_driest_in(&self, all_stats: &[YearStatistics]) -> bool {
        all_stats
            .iter()
            .all(|other| self.lowest_value <= other.lowest_value)
    }

    /// Returns true if this is the wettest year (highest maximum) in a collection.
    pub fn is_wettest_in(&self, all_stats: &[YearStatistics]) -> bool {
        all_stats
            .iter()
            .all(|other| self.highest_value >= other.highest_value)
    }
}

/// Group the period of record into years of `year_type` and compute
/// statistics for each, ordered by year.
pub fn year_statistics(series: &dyn TimeSeries, year_type: YearType) -> Vec<YearStatistics> {
    let mut years: BTreeMap<i32, YearStatistics> = BTreeMap::new();
    let mut missing: BTreeMap<i32, usize> = BTreeMap::new();
    for point in TsIterator::new(series) {
        let year = year_type.year_for(point.date.month(), point.date.year());
        if series.is_data_missing(point.value) {
            *missing.entry(year).or_default() += 1;
            continue;
        }
        years
            .entry(year)
            .and_modify(|stats| stats.add(point.date, point.value))
            .or_insert_with(|| YearStatistics::new(year, year_type, point.date, point.value));
    }
    years
        .into_values()
        .map(|mut stats| {
            stats.missing_count = missing.get(&stats.year).copied().unwrap_or_default();
            stats
        })
        .collect()
}

/// Sorting for collections of year statistics.
pub trait SortYears {
    fn sort_by_driest_years(&mut self);
    fn sort_by_wettest_years(&mut self);
    fn sort_by_most_recent(&mut self);
}

impl SortYears for Vec<YearStatistics> {
    /// Ascending by lowest value.
    fn sort_by_driest_years(&mut self) {
        self.sort_by(|a, b| {
            a.lowest_value
                .partial_cmp(&b.lowest_value)
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Descending by highest value.
    fn sort_by_wettest_years(&mut self) {
        self.sort_by(|a, b| {
            b.highest_value
                .partial_cmp(&a.highest_value)
                .unwrap_or(Ordering::Equal)
        });
    }

    fn sort_by_most_recent(&mut self) {
        self.sort_by(|a, b| b.year.cmp(&a.year));
    }
}
