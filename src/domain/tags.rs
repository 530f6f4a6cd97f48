//! Tag normalization.
//!
//! Tags are free text typed by the user; everything downstream (filtering,
//! dedup-by-eye in the deck list, CSV import) assumes one canonical form:
//! trimmed and lowercased. These helpers are pure and total.

/// Canonicalize a single tag token: trim surrounding whitespace, lowercase.
pub fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Split a comma-separated tag list, normalize each piece, and drop the
/// empty results (so `"a,, b"` yields `["a", "b"]`).
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}
