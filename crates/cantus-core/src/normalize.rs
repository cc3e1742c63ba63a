//! Lyric text normalization.

/// Normalize raw lyric text for vectorization.
///
/// Lowercases the input and keeps only ASCII lowercase letters and
/// whitespace. Everything else (digits, punctuation, symbols, accented
/// letters) is removed outright rather than replaced, so `"don't"` becomes
/// `"dont"`. Whitespace runs are preserved untouched.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect()
}
