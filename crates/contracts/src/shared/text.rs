//! Text helpers shared by the core and the UI.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Placeholder shown instead of a blank value in card headers.
pub const DASH: &str = "—";

/// Comparison form of free text: diacritics removed, lower-cased, trimmed.
///
/// `"  Situação "`, `"SITUACAO"` and `"situacao"` all normalize to `"situacao"`.
/// Lower-casing runs before decomposition (it can emit marks, e.g. `İ`) and
/// trimming runs last, so `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// `normalize` for optional input; absent text is the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Trimmed value, or the dash placeholder when blank.
pub fn display_or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        DASH
    } else {
        trimmed
    }
}
