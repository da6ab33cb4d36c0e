//! Bounded-concurrency batch orchestration.
//!
//! A fixed pool of workers pops organizations off a shared queue and
//! sends each classification result over a channel. Workers share no
//! other state; one unreachable site never affects its siblings.

use std::sync::Arc;

use indicatif::ProgressBar;
use tokio::sync::{mpsc, Mutex};
use tracing::{info, warn};

use crate::classify::classify_site;
use crate::fetch::PageFetcher;
use crate::models::{Organization, SiteResult};

/// Default worker count, balancing throughput against the risk of
/// being rate-limited or blocked by target sites.
pub const DEFAULT_WORKERS: usize = 3;

/// Classify every organization under a bounded worker pool.
///
/// Always returns exactly one result per input; order follows task
/// completion, not input order.
pub async fn run_batch(
    fetcher: &PageFetcher,
    organizations: Vec<Organization>,
    workers: usize,
    progress: Option<ProgressBar>,
) -> Vec<SiteResult> {
    let total = organizations.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);
    info!("classifying {} sites with {} workers", total, workers);

    let queue = Arc::new(Mutex::new(organizations));
    let (tx, mut rx) = mpsc::channel::<SiteResult>(total);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let queue = queue.clone();
        let tx = tx.clone();
        let fetcher = fetcher.clone();

        handles.push(tokio::spawn(async move {
            loop {
                let org = {
                    let mut queue = queue.lock().await;
                    queue.pop()
                };
                let org = match org {
                    Some(org) => org,
                    None => break,
                };

                let result = classify_site(&fetcher, &org).await;
                // The receiver outlives all senders; a send can only
                // fail if the drain loop itself panicked
                if tx.send(result).await.is_err() {
                    warn!("result channel closed early");
                    break;
                }
            }
        }));
    }
    drop(tx);

    let mut results = Vec::with_capacity(total);
    while let Some(result) = rx.recv().await {
        if let Some(pb) = &progress {
            pb.inc(1);
        }
        results.push(result);
    }

    for handle in handles {
        let _ = handle.await;
    }

    results
}
