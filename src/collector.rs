//! Raw measure accumulation
//!
//! One full-text pass over the log: segment, match, and sum durations per
//! distinct trailing value. The compiler emits several sub-measurements for
//! the same declaration across a build, so a value string can appear many
//! times; they are folded into one cumulative entry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::controller::CancelToken;
use crate::extract;
use crate::matcher::TimingMatcher;
use crate::measure::RawMeasure;

/// Minimum cumulative duration (ms) for an entry to be surfaced at all
///
/// Sub-10ms entries are noise at the scale this tool is useful for and
/// would dominate output volume. The comparison is strict: exactly 10ms is
/// excluded.
pub const MIN_CUMULATIVE_MS: f64 = 10.0;

/// Fold all timing lines in `text` into per-value cumulative measures
///
/// Cancellation is cooperative: the flag is polled after each matched line,
/// and on an early stop whatever has accumulated so far is kept, filtered,
/// and returned rather than discarded. The threshold filter runs once, at
/// the end of the pass, and the result is materialized in first-seen order.
pub fn collect(text: &str, cancel: &CancelToken) -> Vec<RawMeasure> {
    let matcher = TimingMatcher::new();
    let mut accumulated: HashMap<String, f64> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for segment in extract::segments(text) {
        let Some(entry) = matcher.match_segment(segment) else {
            continue;
        };

        match accumulated.entry(entry.value.to_string()) {
            Entry::Occupied(mut total) => *total.get_mut() += entry.time,
            Entry::Vacant(slot) => {
                first_seen.push(slot.key().clone());
                slot.insert(entry.time);
            }
        }

        if cancel.is_cancelled() {
            tracing::debug!("scan cancelled after {} distinct values", first_seen.len());
            break;
        }
    }

    first_seen
        .into_iter()
        .filter_map(|value| {
            let time = accumulated.get(&value).copied()?;
            (time > MIN_CUMULATIVE_MS).then(|| RawMeasure::new(time, value))
        })
        .collect()
}
