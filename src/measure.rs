//! Measurement types for the compile timing pipeline
//!
//! `RawMeasure` is the accumulated (duration, trailing-text) pair produced by
//! the collector before structural parsing. `CompileMeasure` is the parsed,
//! per-declaration timing keyed by its physical source line.

/// An accumulated timing entry before structural parsing
///
/// `text` is the unparsed remainder of a matched log line: the file path,
/// a tab, and the declaration the compiler timed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasure {
    /// Cumulative duration in milliseconds
    pub time: f64,
    /// Unparsed path + tab + declaration text
    pub text: String,
}

impl RawMeasure {
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time,
            text: text.into(),
        }
    }
}

/// A parsed per-declaration compile timing
///
/// The `file_and_line` key is derived from `path` at construction and
/// identifies the physical source line independent of column detail, so
/// sub-measurements for the same line (type-check vs. codegen) can be
/// merged by adding their times.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileMeasure {
    /// Duration in milliseconds (accumulates during aggregation)
    pub time: f64,
    /// Raw source location as emitted by the compiler (`file:line:column`)
    pub path: String,
    /// Declaration text with prefix tokens normalized away
    pub code: String,
    file_and_line: String,
}

impl CompileMeasure {
    /// Build a measure from a raw location path and declaration text
    ///
    /// Returns `None` when the path has no parseable line number; malformed
    /// locations are dropped, not surfaced as errors.
    pub fn new(time: f64, raw_path: &str, code: &str) -> Option<Self> {
        let mut parts = raw_path.splitn(3, ':');
        let file = parts.next()?;
        let line = parts.next()?;
        line.parse::<u32>().ok()?;

        Some(Self {
            time,
            path: raw_path.to_string(),
            code: code.to_string(),
            file_and_line: format!("{}:{}", file, line),
        })
    }

    /// Deduplication key: the path truncated to its file-and-line component
    pub fn file_and_line(&self) -> &str {
        &self.file_and_line
    }

    /// Last path component without the location suffix (e.g. `Foo.swift`)
    pub fn file_name(&self) -> &str {
        let start = self.path.rfind('/').map_or(0, |i| i + 1);
        let tail = &self.path[start..];
        match tail.find(':') {
            Some(i) => &tail[..i],
            None => tail,
        }
    }

    /// Line and column display (e.g. `42:9`)
    pub fn location(&self) -> &str {
        let start = self.path.rfind('/').map_or(0, |i| i + 1);
        match self.path[start..].find(':') {
            Some(i) => &self.path[start + i + 1..],
            None => "",
        }
    }
}
