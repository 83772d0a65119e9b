//! duim: du improved.
//!
//! Runs `du` one level deep under a directory and reports each
//! subdirectory's share of the total as a bar graph.

mod cli;
mod collector;
mod display;
mod report;

use anyhow::Result;
use cli::Args;
use collector::Collector;
use display::Display;
use report::SizeReport;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let args = Args::parse_args();
    tracing::debug!(?args, "parsed arguments");

    let raw_lines = Collector::new()
        .with_program(&args.du_program)
        .collect(&args.target);

    if raw_lines.is_empty() {
        anyhow::bail!("Unable to retrieve data for directory {}", args.target);
    }

    let report = SizeReport::aggregate(&raw_lines);
    if report.is_empty() {
        tracing::warn!("no parseable lines in output of `{}`", args.du_program);
    }
    tracing::debug!(
        lines = raw_lines.len(),
        entries = report.len(),
        "aggregated size report"
    );

    let display = Display::new()
        .with_length(args.length)
        .with_human_readable(args.human_readable);
    display.print_report(&report, &args.target)?;

    Ok(())
}
