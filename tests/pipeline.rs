//! End-to-end pipeline tests against a local HTTP fixture server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use langcover::classify::classify_site;
use langcover::fetch::{FetchError, PageFetcher};
use langcover::models::{Organization, SiteStatus};
use langcover::orchestrator::run_batch;

const MULTILINGUAL_PAGE: &str = r#"<html lang="fr-CA">
<head>
  <link rel="alternate" hreflang="fr" href="/fr/">
  <link rel="alternate" hreflang="de" href="/de/">
</head>
<body>
  <nav class="lang-nav">
    <a href="/fr/">Français</a>
    <a href="/de/">Deutsch</a>
  </nav>
  <p>Bienvenue sur notre site.</p>
</body>
</html>"#;

const ENGLISH_PAGE: &str = r#"<html lang="en">
<body><p>Welcome to our site. We publish research reports.</p></body>
</html>"#;

/// Serve a fixed response body on a fresh local port, one connection
/// at a time, until the listener task is dropped with the runtime.
async fn serve(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    format!("http://{}/", addr)
}

/// A local URL with nothing listening on it.
async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

fn org(name: &str, url: String) -> Organization {
    Organization {
        name: name.to_string(),
        url,
    }
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let url = serve("200 OK", ENGLISH_PAGE).await;
    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    let body = fetcher.fetch(&url).await.unwrap();
    assert!(body.contains("Welcome to our site"));
}

#[tokio::test]
async fn test_fetch_reports_bad_status() {
    let url = serve("500 Internal Server Error", "oops").await;
    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    match fetcher.fetch(&url).await {
        Err(FetchError::BadStatus(code)) => assert_eq!(code, 500),
        other => panic!("expected BadStatus, got {:?}", other.map(|_| "body")),
    }
}

#[tokio::test]
async fn test_classify_multilingual_site() {
    let url = serve("200 OK", MULTILINGUAL_PAGE).await;
    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    let result = classify_site(&fetcher, &org("Acme", url)).await;

    assert_eq!(result.status, SiteStatus::Success);
    assert_eq!(result.primary_language.as_deref(), Some("fr"));
    assert!(result.has_language_options);
    assert!(!result.language_options.is_empty());
    // Non-English primary language short-circuits resource detection
    assert!(result.has_non_english_resources);
    assert_eq!(result.http_status, None);
}

#[tokio::test]
async fn test_classify_not_found_site() {
    let url = serve("404 Not Found", "missing").await;
    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    let result = classify_site(&fetcher, &org("Gone", url)).await;

    assert_eq!(result.status, SiteStatus::Error);
    assert_eq!(result.http_status, Some(404));
    assert!(result.primary_language.is_none());
    assert!(!result.has_language_options);
    assert!(result.language_options.is_empty());
}

#[tokio::test]
async fn test_classify_unreachable_site() {
    let url = unreachable_url().await;
    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    let result = classify_site(&fetcher, &org("Dark", url)).await;

    assert_eq!(result.status, SiteStatus::Error);
    assert!(result.primary_language.is_none());
    assert!(!result.has_language_options);
    assert!(result.error.is_some());
    assert_eq!(result.http_status, None);
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let good = serve("200 OK", ENGLISH_PAGE).await;
    let multilingual = serve("200 OK", MULTILINGUAL_PAGE).await;
    let broken = serve("503 Service Unavailable", "down").await;
    let dark = unreachable_url().await;

    let organizations = vec![
        org("good", good),
        org("multilingual", multilingual),
        org("broken", broken),
        org("dark", dark),
    ];

    let fetcher = PageFetcher::with_timeout(Duration::from_secs(5));
    let results = run_batch(&fetcher, organizations, 3, None).await;

    // Exactly one result per input, no drops, no duplicates
    assert_eq!(results.len(), 4);
    let mut names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["broken", "dark", "good", "multilingual"]);

    let by_name = |name: &str| results.iter().find(|r| r.name == name).unwrap();
    assert_eq!(by_name("good").status, SiteStatus::Success);
    assert_eq!(by_name("multilingual").status, SiteStatus::Success);
    assert_eq!(by_name("broken").status, SiteStatus::Error);
    assert_eq!(by_name("broken").http_status, Some(503));
    assert_eq!(by_name("dark").status, SiteStatus::Error);
}

#[tokio::test]
async fn test_batch_with_more_workers_than_sites() {
    let good = serve("200 OK", ENGLISH_PAGE).await;
    let results = run_batch(
        &PageFetcher::with_timeout(Duration::from_secs(5)),
        vec![org("solo", good)],
        8,
        None,
    )
    .await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, SiteStatus::Success);
}
