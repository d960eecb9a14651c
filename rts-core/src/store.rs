//! Dense, calendar-addressed storage for regular-interval time series.
//!
//! Values live in rows of the next coarser calendar unit (see
//! [`crate::granularity`]). Every read and write first checks the period of
//! record, then indexes with unchecked row/column arithmetic. Reads outside
//! the period return the missing value and writes outside it are ignored.

use crate::data::TsData;
use crate::descriptor::SeriesDescriptor;
use crate::error::{Result, TsError};
use crate::granularity::{Daily, Granularity, Hourly, Monthly, Yearly};
use crate::interval::{IntervalBase, TimeInterval};
use crate::position::TimePosition;
use log::{debug, warn};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Operations shared by every store granularity, so callers never branch
/// on the concrete type.
pub trait TimeSeries: Debug {
    fn descriptor(&self) -> &SeriesDescriptor;

    fn descriptor_mut(&mut self) -> &mut SeriesDescriptor;

    /// Set the period of record, converted to the store's precision.
    /// Storage is not touched until [`TimeSeries::allocate`].
    fn set_period(&mut self, start: TimePosition, end: TimePosition);

    /// Replace any existing storage with cells covering the period of
    /// record, each set to `initial_value` or the missing value. Prior
    /// values are discarded. On error the store is left unchanged.
    fn allocate(&mut self, initial_value: Option<f64>) -> Result<()>;

    /// Enable flags on an allocated store. With `retain_previous`, existing
    /// flags are kept; otherwise every flag is set to `initial_flag`.
    fn allocate_flag_space(&mut self, initial_flag: &str, retain_previous: bool);

    /// True once storage is allocated, even if every value is missing.
    fn has_data(&self) -> bool;

    /// Row and column for `position`. No bounds checking is performed.
    fn position_to_row_column(&self, position: &TimePosition) -> (usize, usize);

    /// Number of allocated rows; 0 when unallocated.
    fn row_count(&self) -> usize;

    /// Number of cells in `row`; 0 when unallocated or out of range.
    fn row_length(&self, row: usize) -> usize;

    /// Number of positions from `start` through `end` at the store interval.
    fn calculate_data_size(&self, start: &TimePosition, end: &TimePosition) -> usize;

    fn get_data_value(&self, position: &TimePosition) -> f64;

    /// Value plus units and flag at `position`.
    fn get_data_point(&self, position: &TimePosition) -> TsData;

    fn set_data_value(&mut self, position: &TimePosition, value: f64);

    /// Set a value and its flag. A non-empty flag written to a store without
    /// flags enables flags first.
    fn set_data_value_with_flag(&mut self, position: &TimePosition, value: f64, flag: &str);

    fn date1(&self) -> Option<TimePosition> {
        self.descriptor().date1()
    }

    fn date2(&self) -> Option<TimePosition> {
        self.descriptor().date2()
    }

    fn interval(&self) -> TimeInterval {
        self.descriptor().interval()
    }

    fn units(&self) -> &str {
        self.descriptor().units()
    }

    fn missing(&self) -> f64 {
        self.descriptor().missing()
    }

    fn is_data_missing(&self, value: f64) -> bool {
        self.descriptor().is_data_missing(value)
    }

    fn format_legend(&self, template: &str) -> String {
        self.descriptor().format_legend(template)
    }
}

/// A dense store whose addressing is fixed by the granularity `G`.
#[derive(Debug, Clone)]
pub struct DenseStore<G: Granularity> {
    descriptor: SeriesDescriptor,
    data: Option<Vec<Vec<f64>>>,
    flags: Option<Vec<Vec<String>>>,
    granularity: PhantomData<G>,
}

pub type HourTs = DenseStore<Hourly>;
pub type DayTs = DenseStore<Daily>;
pub type MonthTs = DenseStore<Monthly>;
pub type YearTs = DenseStore<Yearly>;

impl<G: Granularity> DenseStore<G> {
    pub fn new() -> DenseStore<G> {
        DenseStore {
            descriptor: SeriesDescriptor::new(G::BASE.into()),
            data: None,
            flags: None,
            granularity: PhantomData,
        }
    }

    /// Number of positions from `start` through `end` stepping by `mult`;
    /// 0 when `end` precedes `start`.
    pub fn data_size_between(start: &TimePosition, end: &TimePosition, mult: u32) -> usize {
        if end < start {
            return 0;
        }
        G::span(start, end, mult.max(1))
    }

    fn in_period(&self, position: &TimePosition) -> bool {
        match (self.descriptor.date1(), self.descriptor.date2()) {
            (Some(start), Some(end)) => !(*position < start || *position > end),
            _ => false,
        }
    }

    fn cell(&self, position: &TimePosition) -> Option<(usize, usize)> {
        if self.data.is_some() && self.in_period(position) {
            Some(self.position_to_row_column(position))
        } else {
            None
        }
    }

    fn flag_at(&self, row: usize, column: usize) -> String {
        self.flags
            .as_ref()
            .and_then(|flags| flags.get(row))
            .and_then(|cells| cells.get(column))
            .cloned()
            .unwrap_or_default()
    }

    fn shaped<T: Clone>(&self, fill: T) -> Option<Vec<Vec<T>>> {
        self.data.as_ref().map(|data| {
            data.iter()
                .map(|row| vec![fill.clone(); row.len()])
                .collect()
        })
    }
}

impl<G: Granularity> Default for DenseStore<G> {
    fn default() -> Self {
        DenseStore::new()
    }
}

impl<G: Granularity> TimeSeries for DenseStore<G> {
    fn descriptor(&self) -> &SeriesDescriptor {
        &self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut SeriesDescriptor {
        &mut self.descriptor
    }

    fn set_period(&mut self, start: TimePosition, end: TimePosition) {
        let precision = G::BASE.precision();
        self.descriptor.set_date1(start.with_precision(precision));
        self.descriptor.set_date2(end.with_precision(precision));
    }

    fn allocate(&mut self, initial_value: Option<f64>) -> Result<()> {
        let (Some(start), Some(end)) = (self.descriptor.date1(), self.descriptor.date2()) else {
            return Err(TsError::MissingPeriod);
        };
        let mult = self.descriptor.interval_mult();
        if mult != 1 {
            return Err(TsError::UnsupportedInterval { base: G::BASE, mult });
        }
        if start > end {
            return Err(TsError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let fill = initial_value.unwrap_or(self.descriptor.missing());
        let rows = G::row(&start, &end) + 1;
        let data: Vec<Vec<f64>> = (0..rows)
            .map(|row| vec![fill; G::row_length(&start, row)])
            .collect();
        let flags = self.descriptor.has_flags().then(|| {
            data.iter()
                .map(|row| vec![String::new(); row.len()])
                .collect::<Vec<Vec<String>>>()
        });
        let size = G::span(&start, &end, mult);
        debug!(
            "Allocated {} {} rows for {} - {} ({} values)",
            rows,
            G::BASE,
            start,
            end,
            size
        );
        self.data = Some(data);
        self.flags = flags;
        self.descriptor.set_data_size(size);
        self.descriptor.set_dirty(true);
        Ok(())
    }

    fn allocate_flag_space(&mut self, initial_flag: &str, retain_previous: bool) {
        self.descriptor.set_has_flags(true);
        let Some(mut flags) = self.shaped(initial_flag.to_string()) else {
            // flags are built with the data at the next allocation
            return;
        };
        if retain_previous {
            if let Some(previous) = self.flags.take() {
                for (row, cells) in previous.into_iter().enumerate() {
                    for (column, flag) in cells.into_iter().enumerate() {
                        flags[row][column] = flag;
                    }
                }
            }
        }
        self.flags = Some(flags);
    }

    fn has_data(&self) -> bool {
        self.data.is_some()
    }

    fn position_to_row_column(&self, position: &TimePosition) -> (usize, usize) {
        match self.descriptor.date1() {
            Some(start) => (G::row(&start, position), G::column(position)),
            None => (0, 0),
        }
    }

    fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }

    fn row_length(&self, row: usize) -> usize {
        self.data
            .as_ref()
            .and_then(|data| data.get(row))
            .map_or(0, Vec::len)
    }

    fn calculate_data_size(&self, start: &TimePosition, end: &TimePosition) -> usize {
        Self::data_size_between(start, end, self.descriptor.interval_mult())
    }

    fn get_data_value(&self, position: &TimePosition) -> f64 {
        let missing = self.descriptor.missing();
        let Some((row, column)) = self.cell(position) else {
            return missing;
        };
        self.data
            .as_ref()
            .and_then(|data| data.get(row))
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(missing)
    }

    fn get_data_point(&self, position: &TimePosition) -> TsData {
        let flag = match self.cell(position) {
            Some((row, column)) => self.flag_at(row, column),
            None => String::new(),
        };
        TsData {
            date: position.with_precision(G::BASE.precision()),
            value: self.get_data_value(position),
            units: self.descriptor.units().to_string(),
            flag,
            duration: 0,
        }
    }

    fn set_data_value(&mut self, position: &TimePosition, value: f64) {
        let Some((row, column)) = self.cell(position) else {
            return;
        };
        if let Some(cell) = self
            .data
            .as_mut()
            .and_then(|data| data.get_mut(row))
            .and_then(|cells| cells.get_mut(column))
        {
            *cell = value;
            self.descriptor.set_dirty(true);
        }
    }

    fn set_data_value_with_flag(&mut self, position: &TimePosition, value: f64, flag: &str) {
        let Some((row, column)) = self.cell(position) else {
            if self.data.is_none() {
                warn!("Ignoring flagged value at {position}: storage is not allocated");
            }
            return;
        };
        if !flag.is_empty() && self.flags.is_none() {
            self.allocate_flag_space("", true);
        }
        self.set_data_value(position, value);
        if let Some(cell) = self
            .flags
            .as_mut()
            .and_then(|flags| flags.get_mut(row))
            .and_then(|cells| cells.get_mut(column))
        {
            *cell = flag.to_string();
        }
    }
}

/// Create an empty store for `interval`, choosing the granularity by base.
/// The multiplier is recorded so an unsupported one is reported at
/// allocation.
pub fn new_series(interval: TimeInterval) -> Result<Box<dyn TimeSeries>> {
    let mut series: Box<dyn TimeSeries> = match interval.base {
        IntervalBase::Hour => Box::new(HourTs::new()),
        IntervalBase::Day => Box::new(DayTs::new()),
        IntervalBase::Month => Box::new(MonthTs::new()),
        IntervalBase::Year => Box::new(YearTs::new()),
        base => {
            return Err(TsError::UnsupportedInterval {
                base,
                mult: interval.mult,
            })
        }
    };
    series.descriptor_mut().set_interval_mult(interval.mult);
    Ok(series)
}
