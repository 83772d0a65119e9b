//! Directory size collection by delegating to an external `du` command.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io;
use std::process::{Command, Output};
use std::time::Duration;

/// Program used when none is configured
pub const DEFAULT_PROGRAM: &str = "du";

/// Collector configuration
#[derive(Debug)]
pub struct Collector {
    /// Size-computation program, invoked as `<program> -d 1 <path>`
    pub program: String,
}

impl Default for Collector {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }
}

impl Collector {
    /// Create a new Collector that runs `du`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program to run instead of `du`
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Run the size command one level deep under `path` and return its raw
    /// output lines.
    ///
    /// Failures never propagate: a missing program, a spawn error or a
    /// non-zero exit status are reported on stderr and yield an empty
    /// vector. Anything the command writes to stderr is echoed as a warning.
    pub fn collect(&self, path: &str) -> Vec<String> {
        tracing::debug!(program = %self.program, path, "running size command");

        let output = match self.run(path) {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                eprintln!(
                    "{} `{}` command not found. Ensure it's installed on your system.",
                    "Error:".red().bold(),
                    self.program
                );
                return Vec::new();
            }
            Err(err) => {
                eprintln!(
                    "{} failed to run `{}`: {}",
                    "Error:".red().bold(),
                    self.program,
                    err
                );
                return Vec::new();
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            eprintln!("{} {}", "Warning:".yellow().bold(), stderr.trim());
        }

        if !output.status.success() {
            tracing::debug!(status = %output.status, "size command failed");
            return Vec::new();
        }

        let lines = split_lines(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!(lines = lines.len(), "size command finished");
        lines
    }

    /// Spawn the command and wait for it.
    ///
    /// `Command::output` reads stdout and stderr concurrently, so a child that
    /// fills one pipe while we wait on the other cannot deadlock.
    fn run(&self, path: &str) -> io::Result<Output> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Measuring {path}..."));

        let output = Command::new(&self.program)
            .args(["-d", "1"])
            .arg(path)
            .output();

        pb.finish_and_clear();
        output
    }
}

/// Split command output into lines, keeping trailing whitespace.
///
/// Only the `\n` terminator is removed; the empty piece after the final
/// newline is dropped.
fn split_lines(stdout: &str) -> Vec<String> {
    if stdout.is_empty() {
        return Vec::new();
    }
    let body = stdout.strip_suffix('\n').unwrap_or(stdout);
    body.split('\n').map(str::to_string).collect()
}
