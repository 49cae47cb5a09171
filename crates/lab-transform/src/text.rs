//! Text normalization primitives.
//!
//! Every comparison of free-text labels in the pipeline goes through these
//! helpers so that accents, case, spacing and punctuation never decide a match.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Strips diacritics and surrounding whitespace.
///
/// The text is decomposed (NFKD) and combining marks are dropped, so
/// `"Ácido Úrico"` folds to `"Acido Urico"`.
pub fn fold(text: &str) -> String {
    let folded: String = text.nfkd().filter(|ch| !is_combining_mark(*ch)).collect();
    folded.trim().to_string()
}

/// Builds a comparison slug from a label.
///
/// Folds, lowercases, replaces every non-alphanumeric character with `_`,
/// collapses repeated underscores and trims them from both ends.
///
/// # Examples
///
/// ```
/// use lab_transform::text::slug;
///
/// assert_eq!(slug("Fec. Nacimiento"), "fec_nacimiento");
/// assert_eq!(slug("  APELLIDO-P  "), "apellido_p");
/// assert_eq!(slug("Año"), "ano");
/// ```
pub fn slug(text: &str) -> String {
    let lowered = fold(text).to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_underscore = true; // Treat start as underscore to skip leading
    for ch in lowered.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }
    if out.ends_with('_') {
        out.pop();
    }
    out
}

/// Trims and collapses runs of whitespace into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
