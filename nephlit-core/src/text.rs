//! Small text helpers shared by the extraction and summary components.
//!
//! All length limits in this crate count characters, not bytes: abstracts
//! and the localized narrative contain CJK text, so byte slicing could
//! split a code point.

/// Truncate a string to at most `max` characters.
pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Collapse runs of whitespace (including newlines) into single spaces and
/// trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
