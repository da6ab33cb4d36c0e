//! Full analysis pipeline: load, classify, persist, summarize.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::fetch::PageFetcher;
use crate::models::load_organizations;
use crate::orchestrator::run_batch;
use crate::report::{
    print_summary, write_results_csv, write_results_json, CoverageStats, RESULTS_CSV, RESULTS_JSON,
};

pub async fn cmd_analyze(
    input: &Path,
    output_dir: &Path,
    workers: usize,
    limit: usize,
) -> anyhow::Result<()> {
    let mut organizations = load_organizations(input)?;
    if limit > 0 {
        organizations.truncate(limit);
    }
    println!(
        "{} Loaded {} organizations from {}",
        style("→").cyan(),
        organizations.len(),
        input.display()
    );

    let pb = ProgressBar::new(organizations.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let fetcher = PageFetcher::new();
    let results = run_batch(&fetcher, organizations, workers, Some(pb.clone())).await;
    pb.finish_and_clear();

    std::fs::create_dir_all(output_dir)?;

    let csv_path = output_dir.join(RESULTS_CSV);
    write_results_csv(&csv_path, &results)?;
    println!(
        "{} Results written to {}",
        style("✓").green(),
        csv_path.display()
    );

    let json_path = output_dir.join(RESULTS_JSON);
    write_results_json(&json_path, &results)?;
    println!(
        "{} Full signal audit written to {}",
        style("✓").green(),
        json_path.display()
    );

    print_summary(&CoverageStats::from_results(&results));
    Ok(())
}
