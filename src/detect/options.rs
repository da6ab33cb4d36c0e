//! Language-selection affordance detection.
//!
//! Five independent strategies, each a pure function from a parsed
//! document to zero or more signals, composed by concatenation. They
//! are not mutually exclusive and are not deduplicated against each
//! other. Thresholds live here as named constants.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{
    attr_lower, element_text, evidence_snippet, is_supported_code, EXCLUDED_DOMAINS,
    LANGUAGE_NAME_ALIASES,
};
use crate::models::{LanguageOptionSignal, SignalKind};

/// Language pickers are small; country lists are not.
const MIN_SELECT_OPTIONS: usize = 2;
const MAX_SELECT_OPTIONS: usize = 15;

/// Link-group bounds: language menus have few entries, and containers
/// larger than this are whole-page shells rather than focused menus.
const MIN_MENU_LINKS: usize = 2;
const MAX_MENU_LINKS: usize = 10;
const MAX_MENU_DESCENDANTS: usize = 20;

/// A single incidental match is insufficient evidence.
const MIN_LANGUAGE_MATCHES: usize = 2;

/// Evidence snippets are truncated to this many characters.
pub(crate) const EVIDENCE_LIMIT: usize = 200;

/// Tokens marking a control as language-related by name alone.
const LANG_CONTROL_TOKENS: [&str; 6] = ["lang", "idioma", "sprache", "langue", "language", "locale"];

/// Container id/class tokens that explicitly mark language navigation.
const EXPLICIT_MENU_TOKENS: [&str; 8] = [
    "language-selector",
    "lang-selector",
    "language-menu",
    "lang-menu",
    "language-nav",
    "lang-nav",
    "language-switcher",
    "lang-switcher",
];

/// Well-known switcher element ids; reliable enough to need no further
/// corroboration beyond one interactive descendant.
const SWITCHER_IDS: [&str; 16] = [
    "language-selector",
    "languageSelector",
    "language-switcher",
    "languageSwitcher",
    "lang-selector",
    "langSelector",
    "lang-switcher",
    "langSwitcher",
    "select-language",
    "selectLanguage",
    "change-language",
    "changeLanguage",
    "translate-button",
    "translateButton",
    "translation-menu",
    "translationMenu",
];

const GOOGLE_TRANSLATE_WIDGET_ID: &str = "google_translate_element";
const GOOGLE_TRANSLATE_INIT: &str = "new google.translate.TranslateElement";

static SELECT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("select").unwrap());
static OPTION_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("option").unwrap());
static CONTAINER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("nav, ul, div").unwrap());
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static INTERACTIVE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a, select, button").unwrap());
static SCRIPT_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").unwrap());
static SWITCHER_ID_SELS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    SWITCHER_IDS
        .iter()
        .map(|id| Selector::parse(&format!("[id=\"{}\"]", id)).unwrap())
        .collect()
});
static GOOGLE_TRANSLATE_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&format!("[id=\"{}\"]", GOOGLE_TRANSLATE_WIDGET_ID)).unwrap()
});
static ALTERNATE_LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"link[rel~="alternate"][hreflang]"#).unwrap());

/// URL path segment like /en/ or /en-us/.
static PATH_LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([a-z]{2})(?:-[a-z]{2})?(/|$|\?)").unwrap());

/// lang= or language= query parameter.
static PARAM_LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&](lang|language)=([a-z]{2})").unwrap());

/// Detect genuine language-switching affordances in a document.
///
/// Returns signals in strategy order: dropdowns, link menus, known
/// switcher ids, alternate hreflang links, embedded translator widgets.
pub fn detect_language_options(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut signals = Vec::new();
    signals.extend(detect_select_controls(doc));
    signals.extend(detect_link_menus(doc));
    signals.extend(detect_switcher_ids(doc));
    signals.extend(detect_alternate_hreflang(doc));
    signals.extend(detect_translate_widget(doc));
    signals
}

/// Dropdown strategy: selector-style controls with a plausible number
/// of options. A language-related name accepts the control outright;
/// otherwise option values and texts must match at least two languages.
fn detect_select_controls(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut signals = Vec::new();
    for select in doc.select(&SELECT_SEL) {
        let options: Vec<ElementRef> = select.select(&OPTION_SEL).collect();
        if !(MIN_SELECT_OPTIONS..=MAX_SELECT_OPTIONS).contains(&options.len()) {
            continue;
        }

        let id = attr_lower(&select, "id");
        let name = attr_lower(&select, "name");
        let classes = attr_lower(&select, "class");
        let named_for_language = LANG_CONTROL_TOKENS
            .iter()
            .any(|t| id.contains(t) || name.contains(t) || classes.contains(t));
        if named_for_language {
            signals.push(LanguageOptionSignal::new(
                SignalKind::Select,
                evidence_snippet(&select),
                BTreeSet::new(),
            ));
            continue;
        }

        let values: Vec<String> = options.iter().map(|o| attr_lower(o, "value")).collect();
        let texts: Vec<String> = options
            .iter()
            .map(|o| element_text(o).to_lowercase())
            .collect();

        let mut matched_codes = BTreeSet::new();

        // English entries are not evidence of a switch away from English,
        // so they do not count toward the value threshold.
        let code_matches = super::SUPPORTED_LANGUAGE_CODES
            .iter()
            .filter(|code| **code != "en")
            .filter(|code| {
                values.iter().any(|v| {
                    v == *code
                        || v.starts_with(&format!("{}-", code))
                        || v.starts_with(&format!("{}_", code))
                })
            })
            .map(|code| matched_codes.insert(code.to_string()))
            .count();

        let name_matches = LANGUAGE_NAME_ALIASES
            .iter()
            .filter(|(alias, _)| texts.iter().any(|t| t.contains(alias)))
            .map(|(_, code)| matched_codes.insert(code.to_string()))
            .count();

        if code_matches >= MIN_LANGUAGE_MATCHES || name_matches >= MIN_LANGUAGE_MATCHES {
            signals.push(LanguageOptionSignal::new(
                SignalKind::Select,
                evidence_snippet(&select),
                matched_codes,
            ));
        }
    }
    signals
}

/// Navigation-group strategy: small link containers whose links point
/// at language-specific paths, carry language query parameters, or are
/// labeled with language names.
fn detect_link_menus(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut signals = Vec::new();
    for container in doc.select(&CONTAINER_SEL) {
        if descendant_element_count(&container) > MAX_MENU_DESCENDANTS {
            continue;
        }

        let links: Vec<ElementRef> = container.select(&ANCHOR_SEL).collect();
        if !(MIN_MENU_LINKS..=MAX_MENU_LINKS).contains(&links.len()) {
            continue;
        }

        let id = attr_lower(&container, "id");
        let classes = attr_lower(&container, "class");
        let explicitly_marked = EXPLICIT_MENU_TOKENS
            .iter()
            .any(|t| id.contains(t) || classes.contains(t));
        let required_matches = if explicitly_marked {
            1
        } else {
            MIN_LANGUAGE_MATCHES
        };

        let filtered: Vec<&ElementRef> = links
            .iter()
            .filter(|link| {
                let href = attr_lower(link, "href");
                !EXCLUDED_DOMAINS.iter().any(|domain| href.contains(domain))
            })
            .collect();
        if filtered.len() < MIN_MENU_LINKS {
            continue;
        }

        let mut matched_codes = BTreeSet::new();
        for link in &filtered {
            let href = attr_lower(link, "href");

            if let Some(caps) = PATH_LANG_RE.captures(&href) {
                let code = &caps[1];
                if is_supported_code(code) {
                    matched_codes.insert(code.to_string());
                }
            }

            if let Some(caps) = PARAM_LANG_RE.captures(&href) {
                let code = &caps[2];
                // hl= on a translate/search domain is result steering,
                // not a site language option
                let steering = href.contains("hl=") && href.contains("scholar.google");
                if is_supported_code(code) && !steering {
                    matched_codes.insert(code.to_string());
                }
            }

            let text = element_text(link).to_lowercase();
            for (alias, code) in LANGUAGE_NAME_ALIASES {
                if text == alias || text == code || text.starts_with(&format!("{} ", alias)) {
                    matched_codes.insert(code.to_string());
                    break;
                }
            }
        }

        if matched_codes.len() >= required_matches {
            signals.push(LanguageOptionSignal::new(
                SignalKind::Menu,
                evidence_snippet(&container),
                matched_codes,
            ));
        }
    }
    signals
}

fn descendant_element_count(el: &ElementRef) -> usize {
    el.descendants()
        .filter(|n| n.id() != el.id() && n.value().is_element())
        .count()
}

/// Identifier-pattern strategy: exact ids used by common switcher
/// widgets, validated only by the presence of an interactive descendant.
fn detect_switcher_ids(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut signals = Vec::new();
    for sel in SWITCHER_ID_SELS.iter() {
        let Some(element) = doc.select(sel).next() else {
            continue;
        };
        if element.select(&INTERACTIVE_SEL).next().is_some() {
            signals.push(LanguageOptionSignal::new(
                SignalKind::IdMatch,
                evidence_snippet(&element),
                BTreeSet::new(),
            ));
        }
    }
    signals
}

/// Alternate-locale-link strategy: declared, machine-readable language
/// alternates. The most authoritative strategy of the five.
fn detect_alternate_hreflang(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut codes = BTreeSet::new();
    for link in doc.select(&ALTERNATE_LINK_SEL) {
        let code = attr_lower(&link, "hreflang");
        if !code.is_empty() && code != "en" && code != "x-default" {
            codes.insert(code);
        }
    }
    if codes.is_empty() {
        return Vec::new();
    }
    let evidence = format!(
        "alternate hreflang: {}",
        codes.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    vec![LanguageOptionSignal::new(
        SignalKind::Hreflang,
        evidence,
        codes,
    )]
}

/// Embedded-translator-widget strategy: the Google Translate container
/// element or its script initialization, each reported independently.
fn detect_translate_widget(doc: &Html) -> Vec<LanguageOptionSignal> {
    let mut signals = Vec::new();
    if let Some(element) = doc.select(&GOOGLE_TRANSLATE_SEL).next() {
        signals.push(LanguageOptionSignal::new(
            SignalKind::GoogleTranslate,
            evidence_snippet(&element),
            BTreeSet::new(),
        ));
    }
    for script in doc.select(&SCRIPT_SEL) {
        let text: String = script.text().collect();
        if text.contains(GOOGLE_TRANSLATE_INIT) {
            signals.push(LanguageOptionSignal::new(
                SignalKind::GoogleTranslate,
                "Google Translate initialization script".to_string(),
                BTreeSet::new(),
            ));
            break;
        }
    }
    signals
}
