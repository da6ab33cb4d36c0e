//! Per-site classification results.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Organization;

/// Outcome of a single site classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    Success,
    Error,
}

impl SiteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteStatus::Success => "success",
            SiteStatus::Error => "error",
        }
    }
}

/// Which detection strategy produced a language-option signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Select,
    Menu,
    IdMatch,
    Hreflang,
    GoogleTranslate,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Select => "select",
            SignalKind::Menu => "menu",
            SignalKind::IdMatch => "id_match",
            SignalKind::Hreflang => "hreflang",
            SignalKind::GoogleTranslate => "google_translate",
        }
    }
}

/// Evidence that a site offers a language-selection affordance.
///
/// A document may yield several signals; strategies are independent and
/// never deduplicated against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageOptionSignal {
    pub kind: SignalKind,
    /// Truncated markup or description backing the signal.
    pub evidence: String,
    /// Distinct supported language codes the strategy matched.
    pub matched_codes: BTreeSet<String>,
}

impl LanguageOptionSignal {
    pub fn new(kind: SignalKind, evidence: String, matched_codes: BTreeSet<String>) -> Self {
        Self {
            kind,
            evidence,
            matched_codes,
        }
    }
}

/// Classification result for one site. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteResult {
    pub name: String,
    pub url: String,
    pub status: SiteStatus,
    /// `None` only on error; `"unknown"` on success without a signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    pub has_language_options: bool,
    pub language_options: Vec<LanguageOptionSignal>,
    pub has_non_english_resources: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// HTTP status code, recorded only for non-2xx responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    pub analyzed_at: DateTime<Utc>,
}

impl SiteResult {
    /// A successful classification.
    pub fn success(
        org: &Organization,
        primary_language: String,
        language_options: Vec<LanguageOptionSignal>,
        has_non_english_resources: bool,
    ) -> Self {
        Self {
            name: org.name.clone(),
            url: org.url.clone(),
            status: SiteStatus::Success,
            primary_language: Some(primary_language),
            has_language_options: !language_options.is_empty(),
            language_options,
            has_non_english_resources,
            error: None,
            http_status: None,
            analyzed_at: Utc::now(),
        }
    }

    /// A fetch that came back with a non-2xx status.
    pub fn bad_status(org: &Organization, code: u16) -> Self {
        Self {
            http_status: Some(code),
            ..Self::failed(org, &format!("HTTP status {}", code))
        }
    }

    /// A site that could not be classified.
    pub fn failed(org: &Organization, detail: &str) -> Self {
        Self {
            name: org.name.clone(),
            url: org.url.clone(),
            status: SiteStatus::Error,
            primary_language: None,
            has_language_options: false,
            language_options: Vec::new(),
            has_non_english_resources: false,
            error: Some(detail.to_string()),
            http_status: None,
            analyzed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn org() -> Organization {
        Organization {
            name: "Acme".to_string(),
            url: "https://acme.org".to_string(),
        }
    }

    fn signal() -> LanguageOptionSignal {
        LanguageOptionSignal::new(
            SignalKind::Hreflang,
            "alternate hreflang: fr".to_string(),
            BTreeSet::from(["fr".to_string()]),
        )
    }

    #[test]
    fn test_options_flag_tracks_signal_count() {
        let none = SiteResult::success(&org(), "en".to_string(), vec![], false);
        assert!(!none.has_language_options);

        let one = SiteResult::success(&org(), "en".to_string(), vec![signal()], false);
        assert!(one.has_language_options);

        let many = SiteResult::success(&org(), "en".to_string(), vec![signal(), signal()], false);
        assert!(many.has_language_options);
        assert_eq!(many.language_options.len(), 2);
    }

    #[test]
    fn test_success_always_has_a_language() {
        let result = SiteResult::success(&org(), "unknown".to_string(), vec![], false);
        assert_eq!(result.status, SiteStatus::Success);
        assert_eq!(result.primary_language.as_deref(), Some("unknown"));
    }

    #[test]
    fn test_error_results_carry_no_language() {
        let result = SiteResult::failed(&org(), "connection reset");
        assert_eq!(result.status, SiteStatus::Error);
        assert!(result.primary_language.is_none());
        assert!(!result.has_language_options);
        assert!(result.language_options.is_empty());
        assert_eq!(result.error.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_bad_status_records_code() {
        let result = SiteResult::bad_status(&org(), 404);
        assert_eq!(result.status, SiteStatus::Error);
        assert_eq!(result.http_status, Some(404));
        assert_eq!(result.error.as_deref(), Some("HTTP status 404"));
    }

    #[test]
    fn test_signal_kind_serialization() {
        let json = serde_json::to_string(&SignalKind::GoogleTranslate).unwrap();
        assert_eq!(json, "\"google_translate\"");
        assert_eq!(SignalKind::IdMatch.as_str(), "id_match");
    }
}
