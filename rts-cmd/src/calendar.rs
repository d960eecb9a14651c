//! Calendar and storage layout reports.

use rts_core::interval::TimeInterval;
use rts_core::position::TimePosition;
use rts_core::store::new_series;
use rts_utils::calendar::{days_in_month, days_in_months, is_leap_year};
use rts_utils::dates::YearType;
use std::io::Write;

/// Print the rows a store would allocate for a period.
pub fn run_size<W: Write>(interval: &str, start: &str, end: &str, mut out: W) -> anyhow::Result<()> {
    let mut series = new_series(TimeInterval::parse(interval)?)?;
    series.set_period(TimePosition::parse(start)?, TimePosition::parse(end)?);
    series.allocate(None)?;

    let lengths: Vec<String> = (0..series.row_count())
        .map(|row| series.row_length(row).to_string())
        .collect();
    let cells: usize = (0..series.row_count()).map(|row| series.row_length(row)).sum();
    writeln!(out, "interval: {}", series.interval())?;
    writeln!(out, "period: {}", series.format_legend("%p"))?;
    writeln!(out, "values: {}", series.descriptor().data_size())?;
    writeln!(out, "rows: {}", series.row_count())?;
    writeln!(out, "cells: {cells}")?;
    writeln!(out, "row lengths: {}", lengths.join(" "))?;
    Ok(())
}

/// Print month lengths for a calendar year and the period of the year of
/// `year_type` starting in that year.
pub fn run_calendar<W: Write>(year: i32, year_type: YearType, mut out: W) -> anyhow::Result<()> {
    for month in 1..=12 {
        writeln!(out, "{year:04}-{month:02}: {} days", days_in_month(month, year))?;
    }
    let leap = if is_leap_year(year) { " (leap year)" } else { "" };
    writeln!(out, "total: {} days{leap}", days_in_months(1, year, 12, year))?;
    if let Some((first, last)) = year_type.date_range(year) {
        writeln!(out, "{year_type} year {year}: {first} - {last}")?;
    }
    Ok(())
}
