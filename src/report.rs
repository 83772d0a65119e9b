//! Parsing of `du` output into an ordered size report.

use std::collections::HashMap;

/// Split a raw `<size>\t<path>` line into its size (KiB) and path.
///
/// Returns `None` when the line has no tab or the size is not a
/// non-negative integer.
pub fn parse_line(line: &str) -> Option<(u64, &str)> {
    let (size, path) = line.split_once('\t')?;
    let size = size.trim().parse().ok()?;
    Some((size, path))
}

/// Directory sizes in KiB, in the order the size command reported them.
#[derive(Debug, Default)]
pub struct SizeReport {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl SizeReport {
    /// Create a new empty SizeReport
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a report from raw lines, skipping any that don't parse
    pub fn aggregate<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Self::new();
        for line in lines {
            let line = line.as_ref();
            match parse_line(line) {
                Some((size, path)) => report.insert(path, size),
                None => tracing::trace!(line, "skipping unparseable line"),
            }
        }
        report
    }

    /// Record a size for `path`. A path seen before keeps its position and
    /// takes the new size.
    pub fn insert(&mut self, path: &str, size: u64) {
        match self.index.get(path) {
            Some(&idx) => self.entries[idx].1 = size,
            None => {
                self.index.insert(path.to_string(), self.entries.len());
                self.entries.push((path.to_string(), size));
            }
        }
    }

    /// Size recorded for `path`
    pub fn get(&self, path: &str) -> Option<u64> {
        self.index.get(path).map(|&idx| self.entries[idx].1)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no line parsed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(path, size)` pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(path, size)| (path.as_str(), *size))
    }

    /// Sum of every entry
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, size)| size).sum()
    }

    /// Total size of `target`.
    ///
    /// `du` ends its output with a line for the target itself, which already
    /// covers every child. When that line is present and no entry exceeds
    /// it, it is the total; otherwise the entries are summed. Either way no
    /// entry is larger than the total.
    pub fn total_for(&self, target: &str) -> u64 {
        let trimmed = target.trim_end_matches('/');
        let largest = self.iter().map(|(_, size)| size).max().unwrap_or(0);
        self.get(target)
            .or_else(|| {
                self.iter()
                    .find(|(path, _)| !trimmed.is_empty() && path.trim_end_matches('/') == trimmed)
                    .map(|(_, size)| size)
            })
            .filter(|&size| size >= largest)
            .unwrap_or_else(|| self.total())
    }
}
