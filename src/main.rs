//! langcover - website language accessibility analyzer.
//!
//! Crawls a list of organization websites and classifies each site's
//! primary language, language-selection affordances, and non-English
//! resources.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use langcover::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "langcover=info"
    } else {
        "langcover=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
