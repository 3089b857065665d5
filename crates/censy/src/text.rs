//! Canonical forms of the message text that all the matching is based on.
//!
//! Every function here preserves the number of `char`s of its input (apart
//! from the combining marks removed by [`strip_diacritics`]), so char
//! positions found in a normalized string are valid in the display string.
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decomposes the text canonically (NFD) and drops the combining marks,
/// e.g. `Crème brûlée` becomes `Creme brulee`. Casing is left intact.
pub fn strip_diacritics(raw: &str) -> String {
    raw.nfd().filter(|&c| !is_combining_mark(c)).collect()
}

/// Lowercases every char of the text individually. The rare chars whose
/// lowercase form takes several chars are left as is.
pub fn fold_case(text: &str) -> String {
    text.chars().map(fold_char_case).collect()
}

/// Canonical form of the message for matching: [`strip_diacritics`]
/// followed by [`fold_case`].
pub fn normalize(raw: &str) -> String {
    fold_case(&strip_diacritics(raw))
}

fn fold_char_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(lower), None) => lower,
        _ => c,
    }
}
