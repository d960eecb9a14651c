//! Command implementations for RTS CLI.
//!
//! Provides subcommands for building regular time series from values given
//! on the command line, reporting their statistics and inspecting the
//! calendar layout of their storage.

use clap::Subcommand;
use std::io;

pub mod calendar;
pub mod context;
pub mod series;

pub use context::Context;
use series::{OutputFormat, SeriesArgs};

#[derive(Subcommand)]
pub enum Command {
    /// Build a series and print one row per interval
    Series {
        #[command(flatten)]
        series: SeriesArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Legend template, e.g. "%A (%U) %p"
        #[arg(long)]
        legend: Option<String>,
    },

    /// Build a series and print its limits and annual statistics
    Stats {
        #[command(flatten)]
        series: SeriesArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Report the rows a store allocates for a period
    Size {
        /// Data interval: Hour, Day, Month or Year
        #[arg(short, long, default_value = "Day")]
        interval: String,

        /// First position of the period
        #[arg(short, long)]
        start: String,

        /// Last position of the period
        #[arg(short, long)]
        end: String,
    },

    /// Print month lengths for a year
    Calendar {
        year: i32,
    },
}

pub fn run(command: Command, context: &mut Context) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let out = stdout.lock();
    match command {
        Command::Series {
            series: args,
            format,
            legend,
        } => series::run_series(&args, format, legend.as_deref(), context, out),
        Command::Stats {
            series: args,
            format,
        } => series::run_stats(&args, format, context, out),
        Command::Size {
            interval,
            start,
            end,
        } => calendar::run_size(&interval, &start, &end, out),
        Command::Calendar { year } => calendar::run_calendar(year, context.year_type, out),
    }
}
