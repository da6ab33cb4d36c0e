//! Heuristic detectors over a parsed HTML document.
//!
//! All detectors tolerate malformed or partial documents: absence of a
//! node is absence of a signal, never an error.

mod guess;
mod options;
mod primary;
mod resources;

pub use guess::guess_language;
pub use options::detect_language_options;
pub use primary::detect_primary_language;
pub use resources::has_non_english_resources;

use scraper::ElementRef;

/// The closed set of two-letter codes recognized by every detector.
pub const SUPPORTED_LANGUAGE_CODES: [&str; 11] = [
    "en", "es", "fr", "de", "it", "pt", "ru", "zh", "ja", "ar", "hi",
];

/// Language names (English and native spellings) mapped to their codes.
pub const LANGUAGE_NAME_ALIASES: [(&str, &str); 21] = [
    ("english", "en"),
    ("español", "es"),
    ("spanish", "es"),
    ("français", "fr"),
    ("french", "fr"),
    ("deutsch", "de"),
    ("german", "de"),
    ("italiano", "it"),
    ("italian", "it"),
    ("português", "pt"),
    ("portuguese", "pt"),
    ("русский", "ru"),
    ("russian", "ru"),
    ("中文", "zh"),
    ("chinese", "zh"),
    ("日本語", "ja"),
    ("japanese", "ja"),
    ("العربية", "ar"),
    ("arabic", "ar"),
    ("हिन्दी", "hi"),
    ("hindi", "hi"),
];

/// Third-party domains whose links carry language parameters without
/// being language selectors.
pub const EXCLUDED_DOMAINS: [&str; 7] = [
    "scholar.google.com",
    "translate.google.com",
    "accounts.google.com",
    "twitter.com",
    "facebook.com",
    "linkedin.com",
    "youtube.com",
];

pub(crate) fn is_supported_code(code: &str) -> bool {
    SUPPORTED_LANGUAGE_CODES.contains(&code)
}

/// Lowercased attribute value, empty string when absent.
pub(crate) fn attr_lower(el: &ElementRef, name: &str) -> String {
    el.value().attr(name).unwrap_or("").to_lowercase()
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Truncated outer HTML used as signal evidence.
pub(crate) fn evidence_snippet(el: &ElementRef) -> String {
    truncate_chars(&el.html(), options::EVIDENCE_LIMIT)
}

pub(crate) fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
