//! Output formatting and display logic.

use crate::report::SizeReport;
use anyhow::{Result, bail};

/// Units for human-readable sizes, starting from the unit `du` reports in
const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

/// Fractional digits used for human-readable sizes
pub const DEFAULT_DECIMALS: usize = 2;

const FILL: char = '=';
const BLANK: char = ' ';

/// Render `percent` (0-100) as a bar exactly `width` characters wide.
///
/// The filled length is rounded half away from zero.
pub fn percent_to_bar(percent: f64, width: usize) -> Result<String> {
    if !(0.0..=100.0).contains(&percent) {
        bail!("Percentage must be between 0 and 100, got {percent}");
    }
    let filled = ((percent * width as f64 / 100.0).round() as usize).min(width);

    let mut bar = String::with_capacity(width);
    bar.extend(std::iter::repeat_n(FILL, filled));
    bar.extend(std::iter::repeat_n(BLANK, width - filled));
    Ok(bar)
}

/// Format a size in KiB using binary units, e.g. `1.50 MiB`.
///
/// A value advances to the next unit only when strictly greater than 1024,
/// so exactly 1024 KiB stays `1024.00 KiB`. PiB is the largest unit.
pub fn size_to_human(kibibytes: u64, decimals: usize) -> String {
    let mut value = kibibytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.decimals$} {}", UNITS[unit])
}

/// Display configuration
#[derive(Debug)]
pub struct Display {
    /// Width of the bar graph
    pub length: usize,
    /// Show sizes with binary units instead of raw counts
    pub human_readable: bool,
}

impl Default for Display {
    fn default() -> Self {
        Self {
            length: 20,
            human_readable: false,
        }
    }
}

impl Display {
    /// Create a new Display with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bar graph width
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Switch between raw and human-readable sizes
    pub fn with_human_readable(mut self, human_readable: bool) -> Self {
        self.human_readable = human_readable;
        self
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &SizeReport, target: &str) -> Result<()> {
        for line in self.render(report, target)? {
            println!("{line}");
        }
        Ok(())
    }

    /// Build the header and one line per report entry
    pub fn render(&self, report: &SizeReport, target: &str) -> Result<Vec<String>> {
        let total = report.total_for(target);

        let mut lines = Vec::with_capacity(report.len() + 1);
        lines.push(self.header(total, target));
        for (path, size) in report.iter() {
            lines.push(self.entry_line(size, total, path)?);
        }
        Ok(lines)
    }

    /// `Total: <size>   <target>`. In human-readable mode the size carries
    /// its unit and no trailing `bytes`.
    fn header(&self, total: u64, target: &str) -> String {
        format!("Total: {}   {}", self.format_size(total), target)
    }

    fn entry_line(&self, size: u64, total: u64, path: &str) -> Result<String> {
        let percent = if total == 0 {
            0.0
        } else {
            size as f64 / total as f64 * 100.0
        };
        let bar = percent_to_bar(percent, self.length)?;
        Ok(format!(
            "{:>3.0}% [{}] {} {}",
            percent,
            bar,
            self.format_size(size),
            path
        ))
    }

    fn format_size(&self, kibibytes: u64) -> String {
        if self.human_readable {
            size_to_human(kibibytes, DEFAULT_DECIMALS)
        } else {
            format!("{kibibytes} bytes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_matches_width() {
        for width in [0, 1, 7, 20, 33] {
            for percent in [0.0, 12.5, 33.3, 50.0, 99.9, 100.0] {
                assert_eq!(percent_to_bar(percent, width).unwrap().len(), width);
            }
        }
    }

    #[test]
    fn test_bar_extremes() {
        assert_eq!(percent_to_bar(0.0, 10).unwrap(), " ".repeat(10));
        assert_eq!(percent_to_bar(100.0, 10).unwrap(), "=".repeat(10));
        assert_eq!(percent_to_bar(50.0, 10).unwrap(), "=====     ");
    }

    #[test]
    fn test_bar_rounds_half_away_from_zero() {
        // 25% of 10 is 2.5 cells
        assert_eq!(percent_to_bar(25.0, 10).unwrap(), "===       ");
        assert_eq!(percent_to_bar(24.0, 10).unwrap(), "==        ");
    }

    #[test]
    fn test_bar_out_of_range() {
        assert!(percent_to_bar(-0.1, 10).is_err());
        assert!(percent_to_bar(100.1, 10).is_err());
        assert!(percent_to_bar(f64::NAN, 10).is_err());
    }

    #[test]
    fn test_size_to_human_boundaries() {
        assert_eq!(size_to_human(0, 2), "0.00 KiB");
        assert_eq!(size_to_human(1024, 2), "1024.00 KiB");
        assert_eq!(size_to_human(1025, 2), "1.00 MiB");
        assert_eq!(size_to_human(1536, 2), "1.50 MiB");
        assert_eq!(size_to_human(1024 * 1024 + 1, 2), "1.00 GiB");
    }

    #[test]
    fn test_size_to_human_caps_at_pib() {
        let huge = 5 * 1024u64.pow(5);
        assert_eq!(size_to_human(huge, 2), "5120.00 PiB");
    }

    #[test]
    fn test_size_to_human_decimals() {
        assert_eq!(size_to_human(1536, 0), "2 MiB");
        assert_eq!(size_to_human(1536, 3), "1.500 MiB");
    }

    #[test]
    fn test_render_raw() {
        let report = SizeReport::aggregate(["4\t./sub1", "8\t./sub2", "12\t."]);
        let lines = Display::new().render(&report, ".").unwrap();
        assert_eq!(
            lines,
            vec![
                "Total: 12 bytes   .",
                " 33% [=======             ] 4 bytes ./sub1",
                " 67% [=============       ] 8 bytes ./sub2",
                "100% [====================] 12 bytes .",
            ]
        );
    }

    #[test]
    fn test_render_human() {
        let report = SizeReport::aggregate(["1536\t./a", "512\t./b"]);
        let lines = Display::new()
            .with_length(4)
            .with_human_readable(true)
            .render(&report, ".")
            .unwrap();
        assert_eq!(
            lines,
            vec![
                "Total: 2.00 MiB   .",
                " 75% [=== ] 1.50 MiB ./a",
                " 25% [=   ] 512.00 KiB ./b",
            ]
        );
    }

    #[test]
    fn test_render_target_smaller_than_child() {
        let report = SizeReport::aggregate(["100\t./a", "12\t."]);
        let lines = Display::new().with_length(10).render(&report, ".").unwrap();
        assert_eq!(
            lines,
            vec![
                "Total: 112 bytes   .",
                " 89% [========= ] 100 bytes ./a",
                " 11% [=         ] 12 bytes .",
            ]
        );

        let report = SizeReport::aggregate(["1536\t./a", "512\t."]);
        let lines = Display::new()
            .with_length(4)
            .with_human_readable(true)
            .render(&report, ".")
            .unwrap();
        assert_eq!(lines[0], "Total: 2.00 MiB   .");
        assert_eq!(lines[1], " 75% [=== ] 1.50 MiB ./a");
    }

    #[test]
    fn test_render_zero_total() {
        let report = SizeReport::aggregate(["0\t./empty", "0\t."]);
        let lines = Display::new().with_length(5).render(&report, ".").unwrap();
        assert_eq!(lines[0], "Total: 0 bytes   .");
        assert_eq!(lines[1], "  0% [     ] 0 bytes ./empty");
    }
}
