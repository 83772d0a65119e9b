//! Command-line argument parsing using clap derive macros.

use clap::Parser;

/// DU Improved: see disk usage per subdirectory with bar charts.
///
/// Runs `du` one level deep under the target directory and prints each
/// entry's share of the total as a bar graph.
#[derive(Parser, Debug)]
#[command(name = "duim")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory to report on (defaults to current directory)
    #[arg(value_name = "TARGET", default_value = ".")]
    pub target: String,

    /// Length of the bar graph in characters
    #[arg(short = 'l', long = "length", default_value = "20")]
    pub length: usize,

    /// Print sizes in human-readable format (e.g. 1.50 MiB)
    #[arg(short = 'H', long = "human-readable")]
    pub human_readable: bool,

    /// Program used to compute directory sizes
    #[arg(
        long = "du",
        value_name = "PROGRAM",
        env = "DUIM_DU",
        default_value = "du",
        hide_short_help = true
    )]
    pub du_program: String,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
