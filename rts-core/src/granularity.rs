//! Row/column addressing for each store granularity.
//!
//! A row is one period of the next coarser unit (a month of days, a day of
//! hours); a column is the position within that period. None of these
//! functions check bounds: callers compare against the period of record
//! first.

use crate::interval::IntervalBase;
use crate::position::TimePosition;
use rts_utils::calendar::{days_in_month, from_absolute_month, HOURS_PER_DAY};
use std::fmt::Debug;

pub trait Granularity: Debug + Clone + Copy + Default + 'static {
    /// The interval base addressed by this granularity.
    const BASE: IntervalBase;

    /// Row of `position` relative to the row holding `start`.
    fn row(start: &TimePosition, position: &TimePosition) -> usize;

    /// Column of `position` within its row.
    fn column(position: &TimePosition) -> usize;

    /// Number of cells in `row`, counted from the row holding `start`.
    fn row_length(start: &TimePosition, row: usize) -> usize;

    /// Positions from `start` through `end` inclusive, stepping by `mult`.
    /// `end` must not precede `start`.
    fn span(start: &TimePosition, end: &TimePosition, mult: u32) -> usize;
}

/// One row per day, one column per hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hourly;

/// One row per month, one column per day of that month.
#[derive(Debug, Clone, Copy, Default)]
pub struct Daily;

/// One row per month, single column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Monthly;

/// One row per year, single column.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yearly;

impl Granularity for Hourly {
    const BASE: IntervalBase = IntervalBase::Hour;

    fn row(start: &TimePosition, position: &TimePosition) -> usize {
        (position.absolute_day() - start.absolute_day()) as usize
    }

    fn column(position: &TimePosition) -> usize {
        position.hour() as usize
    }

    fn row_length(_start: &TimePosition, _row: usize) -> usize {
        HOURS_PER_DAY as usize
    }

    fn span(start: &TimePosition, end: &TimePosition, mult: u32) -> usize {
        let hours = (end.absolute_day() - start.absolute_day()) * HOURS_PER_DAY as i64
            + end.hour() as i64
            - start.hour() as i64;
        (hours / mult as i64) as usize + 1
    }
}

impl Granularity for Daily {
    const BASE: IntervalBase = IntervalBase::Day;

    fn row(start: &TimePosition, position: &TimePosition) -> usize {
        (position.absolute_month() - start.absolute_month()) as usize
    }

    fn column(position: &TimePosition) -> usize {
        position.day() as usize - 1
    }

    fn row_length(start: &TimePosition, row: usize) -> usize {
        let (month, year) = from_absolute_month(start.absolute_month() + row as i32);
        days_in_month(month, year) as usize
    }

    fn span(start: &TimePosition, end: &TimePosition, mult: u32) -> usize {
        let days = end.absolute_day() - start.absolute_day();
        (days / mult as i64) as usize + 1
    }
}

impl Granularity for Monthly {
    const BASE: IntervalBase = IntervalBase::Month;

    fn row(start: &TimePosition, position: &TimePosition) -> usize {
        (position.absolute_month() - start.absolute_month()) as usize
    }

    fn column(_position: &TimePosition) -> usize {
        0
    }

    fn row_length(_start: &TimePosition, _row: usize) -> usize {
        1
    }

    fn span(start: &TimePosition, end: &TimePosition, mult: u32) -> usize {
        let months = end.absolute_month() - start.absolute_month();
        (months / mult as i32) as usize + 1
    }
}

impl Granularity for Yearly {
    const BASE: IntervalBase = IntervalBase::Year;

    fn row(start: &TimePosition, position: &TimePosition) -> usize {
        (position.year() - start.year()) as usize
    }

    fn column(_position: &TimePosition) -> usize {
        0
    }

    fn row_length(_start: &TimePosition, _row: usize) -> usize {
        1
    }

    fn span(start: &TimePosition, end: &TimePosition, mult: u32) -> usize {
        ((end.year() - start.year()) / mult as i32) as usize + 1
    }
}
