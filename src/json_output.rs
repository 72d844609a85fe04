//! JSON output format for compile timing reports

use serde::{Deserialize, Serialize};

use crate::measure::CompileMeasure;

/// A single ranked timing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonMeasure {
    /// Cumulative duration in milliseconds
    pub time_ms: f64,
    /// File name without directories (e.g. "Foo.swift")
    pub file: String,
    /// Deduplication key for the physical source line
    pub file_and_line: String,
    /// Line and column as reported by the compiler
    pub location: String,
    /// Normalized declaration text
    pub code: String,
}

/// A full scan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Number of ranked entries above threshold
    pub total_entries: usize,
    /// Sum of all entry durations in milliseconds
    pub total_time_ms: f64,
    /// Entries sorted by time, descending
    pub measures: Vec<JsonMeasure>,
}

impl JsonReport {
    /// Build a report from ranked measures
    pub fn from_measures(measures: &[CompileMeasure]) -> Self {
        let total_time_ms = measures.iter().map(|m| m.time).sum();
        Self {
            total_entries: measures.len(),
            total_time_ms,
            measures: measures
                .iter()
                .map(|m| JsonMeasure {
                    time_ms: m.time,
                    file: m.file_name().to_string(),
                    file_and_line: m.file_and_line().to_string(),
                    location: m.location().to_string(),
                    code: m.code.clone(),
                })
                .collect(),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measures() -> Vec<CompileMeasure> {
        vec![
            CompileMeasure::new(35.0, "/a/Foo.swift:1:1", "func f()").unwrap(),
            CompileMeasure::new(12.5, "/a/Bar.swift:7:3", "class C").unwrap(),
        ]
    }

    #[test]
    fn test_report_totals() {
        let report = JsonReport::from_measures(&measures());
        assert_eq!(report.total_entries, 2);
        assert_eq!(report.total_time_ms, 47.5);
    }

    #[test]
    fn test_report_entry_fields() {
        let report = JsonReport::from_measures(&measures());
        assert_eq!(report.measures[0].file, "Foo.swift");
        assert_eq!(report.measures[0].file_and_line, "/a/Foo.swift:1");
        assert_eq!(report.measures[0].location, "1:1");
        assert_eq!(report.measures[0].code, "func f()");
    }

    #[test]
    fn test_report_serializes() {
        let report = JsonReport::from_measures(&measures());
        let json = report.to_json_string().unwrap();
        assert!(json.contains("\"total_entries\": 2"));
        assert!(json.contains("Foo.swift"));
    }

    #[test]
    fn test_report_roundtrip() {
        let report = JsonReport::from_measures(&measures());
        let json = report.to_json_string().unwrap();
        let parsed: JsonReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_entries, report.total_entries);
        assert_eq!(parsed.measures[1].code, "class C");
    }

    #[test]
    fn test_report_empty() {
        let report = JsonReport::from_measures(&[]);
        assert_eq!(report.total_entries, 0);
        assert_eq!(report.total_time_ms, 0.0);
        assert!(report.measures.is_empty());
    }
}
