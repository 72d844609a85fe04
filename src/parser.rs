//! Structural parsing of raw measures
//!
//! Splits an accumulated value string into its source location and
//! declaration text, and normalizes declaration-prefix tokens so the same
//! symbol always reads the same way in the ranking.

use crate::measure::{CompileMeasure, RawMeasure};

/// Declaration prefixes stripped from the code fragment, in order
const DECLARATION_PREFIXES: [&str; 3] = ["@objc ", "final ", "@IBAction "];

/// Parse one raw measure into a structured compile measure
///
/// The value text splits on its first tab: location on the left,
/// declaration on the right. Anything without both parts, or without a
/// parseable line number, is malformed and dropped, never an error.
pub fn parse_measure(raw: &RawMeasure) -> Option<CompileMeasure> {
    let (raw_path, code) = raw.text.split_once('\t')?;
    // At most one record separator ends the segment; declarations can
    // legitimately contain quotes of their own.
    let code = code.strip_suffix(['"', '\r']).unwrap_or(code);
    CompileMeasure::new(raw.time, raw_path, trim_prefixes(code))
}

/// Parse a whole scan's raw measures, dropping malformed entries
pub fn parse_measures(raw: &[RawMeasure]) -> Vec<CompileMeasure> {
    raw.iter().filter_map(parse_measure).collect()
}

/// Strip declaration-prefix tokens, each at most once, in fixed order
fn trim_prefixes(code: &str) -> &str {
    let mut code = code;
    for prefix in DECLARATION_PREFIXES {
        code = code.strip_prefix(prefix).unwrap_or(code);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_measure_splits_path_and_code() {
        let raw = RawMeasure::new(15.0, "/a.swift:1:1\tfunc f()\"");
        let m = parse_measure(&raw).unwrap();
        assert_eq!(m.path, "/a.swift:1:1");
        assert_eq!(m.code, "func f()");
        assert_eq!(m.time, 15.0);
    }

    #[test]
    fn test_parse_measure_drops_tabless_text() {
        let raw = RawMeasure::new(15.0, "/a.swift:1:1 func f()");
        assert!(parse_measure(&raw).is_none());
    }

    #[test]
    fn test_parse_measure_drops_unparseable_location() {
        let raw = RawMeasure::new(15.0, "/a.swift\tfunc f()");
        assert!(parse_measure(&raw).is_none());
    }

    #[test]
    fn test_parse_measure_trims_record_separator() {
        let cr = RawMeasure::new(15.0, "/a.swift:1:1\tfunc f()\r");
        assert_eq!(parse_measure(&cr).unwrap().code, "func f()");
    }

    #[test]
    fn test_trim_objc_prefix() {
        let raw = RawMeasure::new(15.0, "/a.swift:1:1\t@objc func f()\"");
        assert_eq!(parse_measure(&raw).unwrap().code, "func f()");
    }

    #[test]
    fn test_trim_final_prefix() {
        let raw = RawMeasure::new(20.0, "/a.swift:1:1\tfinal class C\"");
        assert_eq!(parse_measure(&raw).unwrap().code, "class C");
    }

    #[test]
    fn test_trim_ibaction_prefix() {
        let raw = RawMeasure::new(20.0, "/a.swift:1:1\t@IBAction func tap()\"");
        assert_eq!(parse_measure(&raw).unwrap().code, "func tap()");
    }

    #[test]
    fn test_trim_stacked_prefixes_in_order() {
        let raw = RawMeasure::new(20.0, "/a.swift:1:1\t@objc final func f()\"");
        assert_eq!(parse_measure(&raw).unwrap().code, "func f()");
    }

    #[test]
    fn test_trim_prefixes_idempotent_on_stripped_code() {
        let stripped = trim_prefixes("@objc func f()");
        assert_eq!(trim_prefixes(stripped), stripped);
    }

    #[test]
    fn test_parse_measures_keeps_only_wellformed() {
        let raw = vec![
            RawMeasure::new(15.0, "/a.swift:1:1\tfunc f()\""),
            RawMeasure::new(20.0, "no tab here"),
            RawMeasure::new(25.0, "/b.swift:2:2\tfunc g()\""),
        ];
        let parsed = parse_measures(&raw);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].code, "func f()");
        assert_eq!(parsed[1].code, "func g()");
    }
}
