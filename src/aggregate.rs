//! Per-line aggregation and ranking
//!
//! The compiler attributes several sub-measurements (type-check, codegen)
//! to the same source line. Grouping by the file-and-line key folds those
//! into one entry; ranking orders the result by cost.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::measure::CompileMeasure;

/// Merge measures that share a file-and-line key
///
/// The first occurrence of a key seeds the entry; later occurrences add
/// their time into it and contribute nothing else. Output order is not
/// significant here; the ranker imposes the final order.
pub fn group_by_location(measures: Vec<CompileMeasure>) -> Vec<CompileMeasure> {
    let mut grouped: HashMap<String, CompileMeasure> = HashMap::new();
    for measure in measures {
        match grouped.entry(measure.file_and_line().to_string()) {
            Entry::Occupied(mut existing) => existing.get_mut().time += measure.time,
            Entry::Vacant(slot) => {
                slot.insert(measure);
            }
        }
    }
    grouped.into_values().collect()
}

/// Sort measures by duration, descending
///
/// Order among equal-time entries is unspecified.
pub fn rank(measures: &mut [CompileMeasure]) {
    measures.sort_by(|a, b| b.time.total_cmp(&a.time));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measure(time: f64, path: &str, code: &str) -> CompileMeasure {
        CompileMeasure::new(time, path, code).unwrap()
    }

    #[test]
    fn test_group_merges_equal_keys() {
        let merged = group_by_location(vec![
            measure(15.0, "/a.swift:1:1", "func f()"),
            measure(20.0, "/a.swift:1:9", "class C"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].time, 35.0);
    }

    #[test]
    fn test_group_keeps_first_occurrence_fields() {
        let merged = group_by_location(vec![
            measure(15.0, "/a.swift:1:1", "func f()"),
            measure(20.0, "/a.swift:1:9", "class C"),
        ]);
        assert_eq!(merged[0].code, "func f()");
        assert_eq!(merged[0].path, "/a.swift:1:1");
    }

    #[test]
    fn test_group_distinct_keys_never_merge() {
        let merged = group_by_location(vec![
            measure(15.0, "/a.swift:1:1", "func f()"),
            measure(20.0, "/a.swift:2:1", "func g()"),
            measure(25.0, "/b.swift:1:1", "func h()"),
        ]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_group_column_detail_does_not_split_a_line() {
        // Same physical line reported at two columns still merges.
        let merged = group_by_location(vec![
            measure(11.0, "/a.swift:7:5", "func f()"),
            measure(12.0, "/a.swift:7:21", "func f()"),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].time, 23.0);
    }

    #[test]
    fn test_rank_sorts_descending() {
        let mut measures = vec![
            measure(11.0, "/a.swift:1:1", "a"),
            measure(33.0, "/b.swift:2:1", "b"),
            measure(22.0, "/c.swift:3:1", "c"),
        ];
        rank(&mut measures);
        let times: Vec<f64> = measures.iter().map(|m| m.time).collect();
        assert_eq!(times, vec![33.0, 22.0, 11.0]);
    }

    #[test]
    fn test_rank_adjacent_pairs_non_increasing() {
        let mut measures = vec![
            measure(14.0, "/a.swift:1:1", "a"),
            measure(14.0, "/b.swift:2:1", "b"),
            measure(99.0, "/c.swift:3:1", "c"),
            measure(12.5, "/d.swift:4:1", "d"),
        ];
        rank(&mut measures);
        for pair in measures.windows(2) {
            assert!(pair[0].time >= pair[1].time);
        }
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_by_location(Vec::new()).is_empty());
    }
}
