//! Primary content language detection.
//!
//! Ordered fallback chain: declared attributes first (site authors
//! declare them, so they are authoritative), free-text inference last
//! (short or templated text yields unreliable guesses). Each free-text
//! stage is gated by a minimum length before the guesser is consulted;
//! a guesser miss moves to the next stage rather than aborting.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::{element_text, guess_language};

/// Returned when no signal could be extracted from a fetched document.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Minimum text length before free-text inference is trusted.
const MIN_GUESS_TEXT_CHARS: usize = 100;

/// How many leading paragraphs feed the first free-text stage.
const PARAGRAPH_SAMPLE: usize = 5;

static PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static META_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Main-content containers tried, in order, when paragraphs are thin.
static CONTENT_SELS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    ["main", "article", "section", "div.content", "div.main"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});

/// Detect the dominant declared or inferred language of a document.
///
/// Returns a lowercase language code with any region subtag stripped
/// (`fr-CA` becomes `fr`), or [`UNKNOWN_LANGUAGE`].
pub fn detect_primary_language(doc: &Html) -> String {
    // 1. lang attribute on the root element (most reliable)
    if let Some(lang) = declared_root_lang(doc) {
        return lang;
    }

    // 2. content-language meta tag
    if let Some(lang) = declared_meta_lang(doc) {
        return lang;
    }

    // 3. Free-text inference, most focused text first
    if let Some(lang) = paragraph_text(doc).and_then(|t| guess_language(&t)) {
        return lang;
    }
    if let Some(lang) = main_content_text(doc).and_then(|t| guess_language(&t)) {
        return lang;
    }
    if let Some(lang) = body_text(doc).and_then(|t| guess_language(&t)) {
        return lang;
    }

    UNKNOWN_LANGUAGE.to_string()
}

fn primary_subtag(value: &str) -> Option<String> {
    let value = value.trim().to_lowercase();
    if value.is_empty() {
        return None;
    }
    Some(match value.split_once('-') {
        Some((primary, _region)) => primary.to_string(),
        None => value,
    })
}

fn declared_root_lang(doc: &Html) -> Option<String> {
    primary_subtag(doc.root_element().value().attr("lang")?)
}

fn declared_meta_lang(doc: &Html) -> Option<String> {
    doc.select(&META_SEL)
        .find(|meta| {
            meta.value()
                .attr("http-equiv")
                .is_some_and(|v| v.eq_ignore_ascii_case("content-language"))
        })
        .and_then(|meta| meta.value().attr("content"))
        .and_then(primary_subtag)
}

fn enough_text(text: String) -> Option<String> {
    (text.chars().count() > MIN_GUESS_TEXT_CHARS).then_some(text)
}

fn paragraph_text(doc: &Html) -> Option<String> {
    let text = doc
        .select(&PARAGRAPH_SEL)
        .take(PARAGRAPH_SAMPLE)
        .map(|p| element_text(&p))
        .collect::<Vec<_>>()
        .join(" ");
    enough_text(text)
}

fn main_content_text(doc: &Html) -> Option<String> {
    CONTENT_SELS
        .iter()
        .filter_map(|sel| doc.select(sel).next())
        .map(|el| element_text(&el))
        .find_map(|text| enough_text(text))
}

fn body_text(doc: &Html) -> Option<String> {
    let body = doc.select(&BODY_SEL).next()?;
    enough_text(element_text(&body))
}
