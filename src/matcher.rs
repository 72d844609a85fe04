//! Timing-line recognition
//!
//! The compiler's per-declaration timing lines have one fixed shape: a
//! decimal millisecond duration, the literal `ms`, a tab, and an absolute
//! path. Everything else in the log (diagnostics, shell output, partial
//! lines at buffer boundaries) is skipped.

use regex::Regex;

/// A matched timing line: the duration and the path-leading remainder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEntry<'a> {
    /// Duration in milliseconds
    pub time: f64,
    /// Remainder of the segment from the path separator (inclusive) to end
    pub value: &'a str,
}

/// Recognizes the `<duration>ms\t/` prefix on a record segment
#[derive(Debug)]
pub struct TimingMatcher {
    pattern: Regex,
}

impl TimingMatcher {
    pub fn new() -> Self {
        // Duration, "ms", tab, leading slash of an absolute path. The
        // pattern is fixed; a failed compile here is a programming error.
        let pattern = Regex::new(r"^\d*\.?\d+ms\t/").expect("timing pattern is valid");
        Self { pattern }
    }

    /// Test one segment against the timing pattern
    ///
    /// On a match the duration string is everything before `ms` and the
    /// value runs from the path separator to the end of the segment. A
    /// duration that fails numeric parsing skips the segment; partial lines
    /// at buffer boundaries are expected, not errors.
    pub fn match_segment<'a>(&self, segment: &'a str) -> Option<TimedEntry<'a>> {
        let matched = self.pattern.find(segment)?;
        let time: f64 = segment[..matched.end() - 4].parse().ok()?;
        Some(TimedEntry {
            time,
            value: &segment[matched.end() - 1..],
        })
    }
}

impl Default for TimingMatcher {
    fn default() -> Self {
        Self::new()
    }
}
