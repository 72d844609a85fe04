//! Log segmentation
//!
//! An xcactivitylog's text stream does not use plain newlines as its record
//! separator: declaration excerpts embedded in the log can contain raw
//! newlines themselves. Records instead end at a carriage return or a double
//! quote, so segmentation cuts at the next occurrence of either.

/// Record separators inside the activity log text
const SEPARATORS: [char; 2] = ['\r', '"'];

/// Lazily split log text into record segments
///
/// Each segment is a maximal substring running from the end of the previous
/// cut up to and including the next separator. Text after the last separator
/// is never emitted. The whole input is consumed in order, with no overlap
/// and no gaps.
pub fn segments(text: &str) -> Segments<'_> {
    Segments { text, pos: 0 }
}

/// Iterator over record segments, see [`segments`]
#[derive(Debug)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.text.get(self.pos..)?;
        // Both separators are single-byte ASCII, so the segment ends one
        // byte past the match.
        let cut = rest.find(SEPARATORS)?;
        let end = self.pos + cut + 1;
        let segment = &self.text[self.pos..end];
        self.pos = end;
        Some(segment)
    }
}
