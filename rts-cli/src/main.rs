//! RTS CLI - Command line tool for building and inspecting regular time series.

use clap::Parser;
use rts_cmd::Context;

#[derive(Parser)]
#[command(
    name = "rts-cli",
    version,
    about = "Regular-interval time series toolkit"
)]
struct Cli {
    /// Year type for annual grouping: Calendar, Water or NovToOct
    #[arg(long, global = true, default_value = "Calendar")]
    year_type: rts_utils::dates::YearType,

    #[command(subcommand)]
    command: rts_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut context = Context::new(cli.year_type);
    rts_cmd::run(cli.command, &mut context)
}
