//! Per-site classification.
//!
//! Sequences fetch, parse, and the three detectors. Every failure
//! below this boundary becomes data on the result; nothing escapes to
//! the orchestrator.

use scraper::Html;
use tracing::{debug, info};

use crate::detect::{detect_language_options, detect_primary_language, has_non_english_resources};
use crate::fetch::{FetchError, PageFetcher};
use crate::models::{Organization, SiteResult};

/// Classify one organization site. Infallible by contract: fetch and
/// transport errors are converted into `status: error` results.
pub async fn classify_site(fetcher: &PageFetcher, org: &Organization) -> SiteResult {
    info!("analyzing {} - {}", org.name, org.url);

    let html = match fetcher.fetch(&org.url).await {
        Ok(body) => body,
        Err(FetchError::BadStatus(code)) => {
            debug!("{}: HTTP status {}", org.url, code);
            return SiteResult::bad_status(org, code);
        }
        Err(err) => {
            debug!("{}: {}", org.url, err);
            return SiteResult::failed(org, &err.to_string());
        }
    };

    let doc = Html::parse_document(&html);
    let primary_language = detect_primary_language(&doc);
    let language_options = detect_language_options(&doc);
    let has_non_english = has_non_english_resources(&doc, &primary_language);

    SiteResult::success(org, primary_language, language_options, has_non_english)
}
