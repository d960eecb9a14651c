//! Build a series from command-line values and render it.

use crate::context::Context;
use anyhow::{anyhow, Context as _};
use clap::{Args, ValueEnum};
use log::{info, warn};
use rts_core::data::TsData;
use rts_core::date_range::TsIterator;
use rts_core::descriptor::{SeriesDescriptor, DEFAULT_MISSING};
use rts_core::interval::TimeInterval;
use rts_core::position::TimePosition;
use rts_core::store::{new_series, TimeSeries};
use rts_data::fill::{fill_interpolate, FillOptions};
use rts_data::limits::{refresh_limits, TsLimits};
use rts_data::years::{year_statistics, YearStatistics};
use serde::Serialize;
use std::io::Write;

/// Arguments describing a series to build.
#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// Data interval: Hour, Day, Month or Year
    #[arg(short, long, default_value = "Day")]
    pub interval: String,

    /// First position of the period, e.g. 2020-01-01 or 2020-01
    #[arg(short, long)]
    pub start: String,

    /// Last position of the period
    #[arg(short, long)]
    pub end: String,

    /// Missing value sentinel
    #[arg(long, default_value_t = DEFAULT_MISSING, allow_hyphen_values = true)]
    pub missing: f64,

    /// Data units
    #[arg(long, default_value = "")]
    pub units: String,

    /// Identifier: Location.Source.DataType.Interval[.Scenario]
    #[arg(long)]
    pub tsid: Option<String>,

    /// Alias used in legends and as the series name
    #[arg(long)]
    pub alias: Option<String>,

    /// Value assignment DATE=VALUE or DATE=VALUE:FLAG (repeatable)
    #[arg(short = 'v', long = "value", allow_hyphen_values = true)]
    pub values: Vec<String>,

    /// Fill interior gaps by linear interpolation
    #[arg(long)]
    pub fill: bool,

    /// Longest gap to fill
    #[arg(long, requires = "fill")]
    pub max_gap: Option<usize>,

    /// Flag applied to filled values
    #[arg(long, requires = "fill")]
    pub fill_flag: Option<String>,
}

impl SeriesArgs {
    /// Name the series is registered under in the context.
    pub fn name(&self) -> String {
        self.alias
            .clone()
            .or_else(|| self.tsid.clone())
            .unwrap_or_else(|| "series".to_string())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// CSV rows on stdout
    #[default]
    Table,
    /// A single JSON document
    Json,
}

#[derive(Serialize)]
struct SeriesReport<'a> {
    identifier: String,
    legend: Option<String>,
    descriptor: &'a SeriesDescriptor,
    data: Vec<TsData>,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    identifier: String,
    limits: &'a TsLimits,
    years: &'a [YearStatistics],
}

/// Parse `DATE=VALUE` or `DATE=VALUE:FLAG`.
pub fn parse_assignment(text: &str) -> anyhow::Result<(TimePosition, f64, Option<String>)> {
    let (date_text, value_text) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected DATE=VALUE, got \"{text}\""))?;
    let position = TimePosition::parse(date_text)?;
    let (value_text, flag) = match value_text.split_once(':') {
        Some((value, flag)) => (value, Some(flag.trim().to_string())),
        None => (value_text, None),
    };
    let value = value_text
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid value in \"{text}\""))?;
    Ok((position, value, flag))
}

/// Allocate a series for the arguments and apply the value assignments.
pub fn build_series(args: &SeriesArgs) -> anyhow::Result<Box<dyn TimeSeries>> {
    let interval = TimeInterval::parse(&args.interval)?;
    let start = TimePosition::parse(&args.start)?;
    let end = TimePosition::parse(&args.end)?;
    let mut series = new_series(interval)?;

    let descriptor = series.descriptor_mut();
    descriptor.set_missing(args.missing);
    descriptor.set_units(&args.units);
    descriptor.set_units_original(&args.units);
    if let Some(tsid) = &args.tsid {
        descriptor.set_ident(tsid.parse()?);
    }
    if let Some(alias) = &args.alias {
        descriptor.set_alias(alias);
    }
    descriptor.add_to_genesis(&format!("Created {interval} series for {start} - {end}"));

    series.set_period(start, end);
    series.allocate(None)?;

    for text in &args.values {
        let (position, value, flag) = parse_assignment(text)?;
        if position < start || position > end {
            warn!("Ignoring \"{text}\": outside the period {start} - {end}");
            continue;
        }
        match flag {
            Some(flag) => series.set_data_value_with_flag(&position, value, &flag),
            None => series.set_data_value(&position, value),
        }
    }

    if args.fill {
        let options = FillOptions {
            max_gap: args.max_gap,
            flag: args.fill_flag.clone(),
        };
        let filled = fill_interpolate(series.as_mut(), &options);
        info!("Filled {filled} missing values");
    }
    Ok(series)
}

/// Write one CSV row per interval over the period of record.
pub fn write_table<W: Write>(series: &dyn TimeSeries, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for point in TsIterator::new(series) {
        writer.serialize(&point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Build a series, register it in the context and print its values.
pub fn run_series<W: Write>(
    args: &SeriesArgs,
    format: OutputFormat,
    legend: Option<&str>,
    context: &mut Context,
    mut out: W,
) -> anyhow::Result<()> {
    let name = args.name();
    context.insert(&name, build_series(args)?);
    let series = context
        .get(&name)
        .ok_or_else(|| anyhow!("series \"{name}\" is not registered"))?;

    match format {
        OutputFormat::Table => {
            if let Some(template) = legend {
                writeln!(out, "# {}", series.format_legend(template))?;
            }
            write_table(series, out)
        }
        OutputFormat::Json => {
            let report = SeriesReport {
                identifier: series.descriptor().ident().to_string(),
                legend: legend.map(|template| series.format_legend(template)),
                descriptor: series.descriptor(),
                data: TsIterator::new(series).collect(),
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

/// Build a series, register it in the context and print its limits and
/// statistics for each year of the context's year type.
pub fn run_stats<W: Write>(
    args: &SeriesArgs,
    format: OutputFormat,
    context: &mut Context,
    mut out: W,
) -> anyhow::Result<()> {
    let name = args.name();
    context.insert(&name, build_series(args)?);
    let year_type = context.year_type;
    let series = context
        .get_mut(&name)
        .ok_or_else(|| anyhow!("series \"{name}\" is not registered"))?;
    let limits = refresh_limits(series);
    let years = year_statistics(series, year_type);
    info!(
        "{} years of {} statistics for \"{}\"",
        years.len(),
        year_type,
        name
    );

    match format {
        OutputFormat::Table => {
            let mut writer = csv::Writer::from_writer(out);
            for stats in &years {
                writer.serialize(stats)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let report = StatsReport {
                identifier: series.descriptor().ident().to_string(),
                limits: &limits,
                years: &years,
            };
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rts_utils::dates::YearType;

    fn args(interval: &str, start: &str, end: &str, values: &[&str]) -> SeriesArgs {
        SeriesArgs {
            interval: interval.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            missing: DEFAULT_MISSING,
            units: "AF".to_string(),
            tsid: None,
            alias: None,
            values: values.iter().map(|v| v.to_string()).collect(),
            fill: false,
            max_gap: None,
            fill_flag: None,
        }
    }

    #[test]
    fn test_parse_assignment() {
        let (position, value, flag) = parse_assignment("2020-01-05=3.5").unwrap();
        assert_eq!(position.to_string(), "2020-01-05");
        assert_eq!(value, 3.5);
        assert_eq!(flag, None);

        let (position, value, flag) = parse_assignment("2020-01-05 06:30=-1:E").unwrap();
        assert_eq!(position.to_string(), "2020-01-05 06:30");
        assert_eq!(value, -1.0);
        assert_eq!(flag.as_deref(), Some("E"));

        assert!(parse_assignment("2020-01-05").is_err());
        assert!(parse_assignment("2020-01-05=abc").is_err());
    }

    #[test]
    fn test_build_series_applies_values() {
        let series = build_series(&args(
            "Month",
            "2000-01",
            "2000-12",
            &["2000-06=42", "1999-12=1", "2000-07=8:E"],
        ))
        .unwrap();
        let june = TimePosition::parse("2000-06").unwrap();
        assert_eq!(series.get_data_value(&june), 42.0);
        assert_eq!(series.get_data_point(&TimePosition::parse("2000-07").unwrap()).flag, "E");
        assert_eq!(series.descriptor().genesis().len(), 1);
    }

    #[test]
    fn test_build_series_with_fill() {
        let mut series_args = args("Day", "2022-01-01", "2022-01-05", &["2022-01-01=0", "2022-01-05=4"]);
        series_args.fill = true;
        series_args.fill_flag = Some("I".to_string());
        let series = build_series(&series_args).unwrap();
        let point = series.get_data_point(&TimePosition::parse("2022-01-03").unwrap());
        assert_eq!(point.value, 2.0);
        assert_eq!(point.flag, "I");
    }

    #[test]
    fn test_build_series_rejects_multiplier() {
        assert!(build_series(&args("2Day", "2022-01-01", "2022-01-05", &[])).is_err());
    }

    #[test]
    fn test_run_series_table() {
        let mut context = Context::new(YearType::Calendar);
        let mut out = Vec::new();
        let series_args = args("Day", "2020-02-28", "2020-03-01", &["2020-02-29=29"]);
        run_series(&series_args, OutputFormat::Table, Some("%I [%U]"), &mut context, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Day [AF]");
        assert_eq!(lines[1], "date,value,units,flag,duration");
        assert_eq!(lines[2], "2020-02-28,-999.0,AF,,0");
        assert_eq!(lines[3], "2020-02-29,29.0,AF,,0");
        assert_eq!(lines.len(), 5);
        assert!(context.get("series").is_some());
    }

    #[test]
    fn test_run_series_json() {
        let mut context = Context::default();
        let mut out = Vec::new();
        let mut series_args = args("Year", "2000", "2002", &["2001=5"]);
        series_args.tsid = Some("SHA.CDEC.Storage.Year".to_string());
        run_series(&series_args, OutputFormat::Json, None, &mut context, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["identifier"], "SHA.CDEC.Storage.Year");
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["data"][1]["value"], 5.0);
        assert_eq!(json["descriptor"]["date1"], "2000");
        assert!(context.get("SHA.CDEC.Storage.Year").is_some());
    }

    #[test]
    fn test_run_stats_clears_dirty() {
        let mut context = Context::new(YearType::Water);
        let mut out = Vec::new();
        let mut series_args = args("Month", "2019-10", "2021-09", &["2019-11=5", "2021-01=7"]);
        series_args.alias = Some("shasta".to_string());
        run_stats(&series_args, OutputFormat::Json, &mut context, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["years"].as_array().unwrap().len(), 2);
        assert_eq!(json["limits"]["max_value"], 7.0);
        assert!(!context.get("shasta").unwrap().descriptor().is_dirty());
    }
}
