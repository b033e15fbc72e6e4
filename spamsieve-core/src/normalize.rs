//! Case folding shared by automaton construction and scanning.
//!
//! Matching operates on Unicode scalar values. Keywords and scanned text are
//! folded with the same per-character `char::to_lowercase` mapping so that a
//! keyword built in one case convention is found in text written in any other.

/// Lower-cases `text` one `char` at a time without allocating.
///
/// A single input character may fold into several (e.g. `'İ'`), which is why
/// this yields an iterator rather than mapping `char` to `char`.
pub fn fold_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Produces the canonical form of a keyword: trimmed, then folded.
pub fn canonicalize(keyword: &str) -> String {
    fold_chars(keyword.trim()).collect()
}

/// Folds a single character, or returns `None` when its lowercase form is
/// several characters. Such a character could never be matched one-to-one
/// against text folded by [`fold_chars`].
pub(crate) fn fold_single(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(folded), None) => Some(folded),
        _ => None,
    }
}
