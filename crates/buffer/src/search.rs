//! Literal search and replace over buffer text.
//!
//! Matching is exact and case-sensitive; no pattern syntax is interpreted.

use std::ops::Range;

/// Find the first occurrence of `query` in `text`, scanning from the start.
///
/// Returns the match as a char range. An empty query never matches.
pub fn find_first(text: &str, query: &str) -> Option<Range<usize>> {
    if query.is_empty() {
        return None;
    }
    let byte_start = text.find(query)?;
    let start = text[..byte_start].chars().count();
    Some(start..start + query.chars().count())
}

/// Replace every occurrence of `target` in one left-to-right pass, then strip
/// leading and trailing whitespace from the whole result.
///
/// Replacements are not rescanned, so a replacement containing `target` does
/// not cascade.
pub fn replace_all_trimmed(text: &str, target: &str, replacement: &str) -> String {
    if target.is_empty() {
        return text.trim().to_string();
    }
    text.replace(target, replacement).trim().to_string()
}
