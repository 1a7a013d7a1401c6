//! Frontmatter extraction
//!
//! Every post starts with a flat `key: value` block fenced by `---` lines.
//! The block is mandatory: a document without one fails extraction, and the
//! loader turns that into a whole-build failure.

use indexmap::IndexMap;

use super::error::ContentError;

/// The two halves of a raw document: parsed metadata and the untouched
/// markdown body that follows the closing delimiter.
#[derive(Debug)]
pub struct Extracted<'a> {
    pub metadata: IndexMap<String, String>,
    pub content: &'a str,
}

/// Split a raw document into its frontmatter block and content.
///
/// The opening `---` must be the very first line of the document and the
/// block must be closed by a second `---` line. Block lines are split at
/// the first `:`; lines without one are ignored. Duplicate keys keep the
/// last value.
pub fn extract(raw: &str) -> Result<Extracted<'_>, ContentError> {
    let mut lines = raw.split_inclusive('\n');

    let opening = lines.next().unwrap_or("");
    if !is_delimiter(opening) {
        return Err(ContentError::MalformedFrontmatter);
    }

    let mut metadata = IndexMap::new();
    let mut offset = opening.len();

    for line in lines {
        offset += line.len();
        if is_delimiter(line) {
            return Ok(Extracted {
                metadata,
                content: &raw[offset..],
            });
        }
        let text = line.trim_end_matches('\n').trim_end_matches('\r');
        if let Some((key, value)) = text.split_once(':') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    // Opening delimiter was never closed
    Err(ContentError::MalformedFrontmatter)
}

/// A delimiter line contains exactly `---`, modulo the line break. A
/// trailing `\r` is tolerated for CRLF documents; trailing spaces are not.
fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches('\n').trim_end_matches('\r') == "---"
}
