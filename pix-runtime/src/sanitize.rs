//! Free-text normalization for the merchant name and city fields.
//!
//! Both fields only admit `[A-Z0-9 ]`: accents are decomposed and dropped,
//! every other character becomes a space, whitespace runs collapse to one
//! space, and the result is trimmed then capped.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Maximum merchant name length (tag 59)
pub const MAX_NAME_LEN: usize = 25;
/// Maximum merchant city length (tag 60)
pub const MAX_CITY_LEN: usize = 15;

pub fn sanitize_name(raw: &str) -> String {
    sanitize(raw, MAX_NAME_LEN)
}

pub fn sanitize_city(raw: &str) -> String {
    sanitize(raw, MAX_CITY_LEN)
}

/// Sanitize `raw` into at most `max_len` characters of `[A-Z0-9 ]`.
pub fn sanitize(raw: &str, max_len: usize) -> String {
    let mapped: String = raw
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| match c {
            'A'..='Z' | '0'..='9' => c,
            _ => ' ',
        })
        .collect();

    let collapsed = mapped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.len() <= max_len {
        return collapsed;
    }

    tracing::warn!(
        original_len = collapsed.len(),
        max_len,
        "truncating free-text field"
    );
    // ASCII only at this point, so byte slicing is char slicing
    collapsed[..max_len].trim_end().to_string()
}
