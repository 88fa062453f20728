//! Name normalization
//!
//! Turns an arbitrary string into a comparison-safe token sequence made of
//! lowercase ASCII letters separated by single spaces.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Latin letters that carry no canonical decomposition under NFD.
fn fold_undecomposable(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("ss"),
        'æ' => Some("ae"),
        'Æ' => Some("AE"),
        'œ' => Some("oe"),
        'Œ' => Some("OE"),
        'ø' => Some("o"),
        'Ø' => Some("O"),
        'đ' => Some("d"),
        'Đ' => Some("D"),
        'ł' => Some("l"),
        'Ł' => Some("L"),
        'þ' => Some("th"),
        'Þ' => Some("TH"),
        _ => None,
    }
}

/// Normalize a name for comparison.
///
/// Steps, in order:
/// 1. strip diacritical marks (`José` -> `Jose`)
/// 2. lowercase
/// 3. turn every run of hyphens into a single space
/// 4. drop everything that is not `a-z` or a space
/// 5. collapse runs of spaces and trim
///
/// The function is total and idempotent.
///
/// ```rust
/// use namefuzz_core::normalize_name;
///
/// assert_eq!(normalize_name("  John   Döe-Smith  "), "john doe smith");
/// assert_eq!(normalize_name("O'Connor"), "oconnor");
/// ```
pub fn normalize_name(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold_undecomposable(c) {
            Some(folded) => stripped.push_str(folded),
            None => stripped.push(c),
        }
    }

    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars().flat_map(char::to_lowercase) {
        let c = if c == '-' { ' ' } else { c };
        match c {
            'a'..='z' => out.push(c),
            // Leading spaces are trimmed, repeated ones collapsed
            ' ' if !out.is_empty() && !out.ends_with(' ') => out.push(' '),
            _ => {}
        }
    }

    if out.ends_with(' ') {
        out.pop();
    }
    out
}
