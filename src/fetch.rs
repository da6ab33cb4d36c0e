//! HTTP retrieval of organization homepages.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

/// Per-request timeout. A single failed fetch yields a single error
/// result; there are no retries.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Browser-like identity to avoid being blocked.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// English-preferring locale. Sites doing server-side locale negotiation
/// must be probed consistently or primary-language detection drifts.
pub const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Errors that can occur while fetching a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout, DNS failure, connection reset, or malformed response.
    #[error("request failed: {0}")]
    Transport(String),

    /// Server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    BadStatus(u16),
}

/// HTTP client for retrieving raw page HTML.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with the standard per-request timeout.
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// GET a page and return its body. Non-2xx statuses are recoverable
    /// per-site failures, not pipeline failures.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}
