//! Text truncation utilities.
//!
//! Rust `&str[..n]` panics when `n` falls inside a multi-byte character.
//! [`truncate_str`] finds the nearest char boundary so truncation is always
//! safe; [`summarize`] additionally backs off to a sentence boundary so a
//! content summary never ends mid-sentence.

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Summarize `content` to at most `max_len` bytes.
///
/// Returns a prefix of the trimmed content, backed off to the nearest
/// preceding sentence boundary (`.`, `!`, `?`) so the summary never ends
/// mid-sentence. When no boundary exists before the cutoff, hard-truncates
/// at a char boundary. Empty input yields empty output; never panics.
#[must_use]
pub fn summarize(content: &str, max_len: usize) -> String {
    let trimmed = content.trim();
    if trimmed.len() <= max_len {
        return trimmed.to_owned();
    }

    let prefix = truncate_str(trimmed, max_len);
    match prefix.rfind(['.', '!', '?']) {
        // Boundary chars are ASCII, so idx + 1 is always a char boundary.
        Some(idx) => prefix[..=idx].trim_end().to_owned(),
        None => prefix.trim_end().to_owned(),
    }
}
