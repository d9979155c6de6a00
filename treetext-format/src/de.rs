use std::fmt;

use crate::header::{HEADER_PREFIX, MIN_RECORD_LINES, SEPARATOR};
use crate::record::ArchiveEntry;

/// Why a segment of an archive did not yield a record.
///
/// Skips are never fatal; they cover the empty segments produced around
/// back-to-back separators as well as anything that is not a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSkip {
    Empty,
    TooShort { lines: usize },
    MissingHeader { line: String },
}

impl fmt::Display for ParseSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseSkip::Empty => f.write_str("empty segment"),
            ParseSkip::TooShort { lines } => write!(
                f,
                "segment has {} line(s), a record needs at least {}",
                lines, MIN_RECORD_LINES
            ),
            ParseSkip::MissingHeader { line } => {
                write!(f, "segment does not start with `{}`: {:?}", HEADER_PREFIX, line)
            }
        }
    }
}

/// Outcome of parsing one separator-delimited segment.
pub type Segment = std::result::Result<ArchiveEntry, ParseSkip>;

/// Parse a single segment of an archive split on [`SEPARATOR`].
///
/// The segment is trimmed, then split into lines. The first line carries the
/// path, the second is the marker, and everything from the third line on is
/// content joined back with `\n`. Trimming means leading and trailing
/// whitespace of the content (including trailing blank lines) does not
/// survive a round trip, and a record with empty content is skipped.
pub fn parse_segment(segment: &str) -> Segment {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return Err(ParseSkip::Empty);
    }

    let lines: Vec<&str> = trimmed.split('\n').collect();
    if lines.len() < MIN_RECORD_LINES {
        return Err(ParseSkip::TooShort { lines: lines.len() });
    }

    let header = lines[0].trim();
    let original_path = match header.strip_prefix(HEADER_PREFIX) {
        Some(path) => path,
        None => {
            return Err(ParseSkip::MissingHeader {
                line: header.to_string(),
            })
        }
    };

    Ok(ArchiveEntry::new(original_path, lines[2..].join("\n")))
}

/// Iterator over the parsed segments of an in-memory archive, in order.
pub struct Segments<'a> {
    inner: std::str::Split<'a, &'static str>,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str) -> Segments<'a> {
        Segments {
            inner: text.split(SEPARATOR),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(parse_segment)
    }
}
