//! Non-English resource detection.
//!
//! A deliberately permissive signal: a single indicator suffices,
//! unlike the stricter thresholds in the option detector.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use super::{attr_lower, element_text};

/// Language path segments and native-script names that mark a link or
/// section as pointing at non-English content.
const NON_ENGLISH_INDICATORS: [&str; 14] = [
    "/es/", "/fr/", "/de/", "/zh/", "/ru/", "/ja/", "/ar/", "español", "français", "deutsch",
    "中文", "русский", "日本語", "العربية",
];

static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section, div").unwrap());

/// Containers that typically hold publications or documentation.
static RESOURCE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(resource|publication|paper|documentation)").unwrap());

/// Decide whether a document links or embeds substantive non-English
/// content. A non-English primary language is itself the evidence.
pub fn has_non_english_resources(doc: &Html, primary_language: &str) -> bool {
    if primary_language != "en" && primary_language != "unknown" {
        return true;
    }

    for link in doc.select(&LINK_SEL) {
        let href = attr_lower(&link, "href");
        let text = element_text(&link).to_lowercase();
        if NON_ENGLISH_INDICATORS
            .iter()
            .any(|ind| href.contains(ind) || text.contains(ind))
        {
            return true;
        }
    }

    for section in doc.select(&SECTION_SEL) {
        let Some(classes) = section.value().attr("class") else {
            continue;
        };
        if !RESOURCE_CLASS_RE.is_match(classes) {
            continue;
        }
        let text = element_text(&section).to_lowercase();
        if NON_ENGLISH_INDICATORS.iter().any(|ind| text.contains(ind)) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_english_primary_short_circuits() {
        // No links at all; the primary language alone decides
        let doc = Html::parse_document("<html><body></body></html>");
        assert!(has_non_english_resources(&doc, "de"));
    }

    #[test]
    fn test_english_primary_needs_indicators() {
        let doc = Html::parse_document("<html><body><a href=\"/about\">About</a></body></html>");
        assert!(!has_non_english_resources(&doc, "en"));
        assert!(!has_non_english_resources(&doc, "unknown"));
    }

    #[test]
    fn test_language_path_in_link() {
        let doc = Html::parse_document(
            r#"<html><body><a href="/es/recursos">Recursos</a></body></html>"#,
        );
        assert!(has_non_english_resources(&doc, "en"));
    }

    #[test]
    fn test_native_name_in_link_text() {
        let doc =
            Html::parse_document(r#"<html><body><a href="/translated">中文</a></body></html>"#);
        assert!(has_non_english_resources(&doc, "en"));
    }

    #[test]
    fn test_resource_section_with_indicator() {
        let doc = Html::parse_document(
            r#"<html><body>
                 <div class="publications-list">Informe anual en español</div>
               </body></html>"#,
        );
        assert!(has_non_english_resources(&doc, "en"));
    }

    #[test]
    fn test_plain_section_without_resource_class() {
        let doc = Html::parse_document(
            r#"<html><body><div class="footer">español</div></body></html>"#,
        );
        assert!(!has_non_english_resources(&doc, "en"));
    }
}
