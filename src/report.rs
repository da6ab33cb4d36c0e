//! Result persistence and coverage statistics.
//!
//! Two outputs per run: a slim CSV (one row per site, without the
//! signal list) for downstream statistics, and a full JSON document
//! with every signal for manual audit.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use console::style;

use crate::models::{SiteResult, SiteStatus};
use crate::utils::csv::{escape_csv, parse_csv};

/// Slim per-site results for downstream statistics.
pub const RESULTS_CSV: &str = "language_analysis.csv";
/// Full results including every signal, for manual audit.
pub const RESULTS_JSON: &str = "language_analysis_full.json";

const CSV_HEADER: &str = "name,url,status,http_status,primary_language,\
has_language_options,has_non_english_resources,error,analyzed_at";

/// Write the slim results CSV (everything except `language_options`).
pub fn write_results_csv(path: &Path, results: &[SiteResult]) -> anyhow::Result<()> {
    let mut output = Vec::new();
    writeln!(output, "{}", CSV_HEADER).ok();

    for result in results {
        writeln!(
            output,
            "{},{},{},{},{},{},{},{},{}",
            escape_csv(&result.name),
            escape_csv(&result.url),
            result.status.as_str(),
            result.http_status.map(|c| c.to_string()).unwrap_or_default(),
            result.primary_language.as_deref().unwrap_or(""),
            result.has_language_options,
            result.has_non_english_resources,
            escape_csv(result.error.as_deref().unwrap_or("")),
            result.analyzed_at.to_rfc3339(),
        )
        .ok();
    }

    std::fs::write(path, output)
        .with_context(|| format!("failed to write results CSV {}", path.display()))
}

/// Write the full results JSON including all language-option signals.
pub fn write_results_json(path: &Path, results: &[SiteResult]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write results JSON {}", path.display()))
}

/// Aggregate language-accessibility counts across a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageStats {
    pub total: usize,
    pub successful: usize,
    pub english_primary: usize,
    pub with_language_options: usize,
    pub with_non_english_resources: usize,
}

impl CoverageStats {
    pub fn from_results(results: &[SiteResult]) -> Self {
        let successful = results
            .iter()
            .filter(|r| r.status == SiteStatus::Success)
            .count();
        let english_primary = results
            .iter()
            .filter(|r| {
                r.status == SiteStatus::Success && r.primary_language.as_deref() == Some("en")
            })
            .count();
        Self {
            total: results.len(),
            successful,
            english_primary,
            with_language_options: results.iter().filter(|r| r.has_language_options).count(),
            with_non_english_resources: results
                .iter()
                .filter(|r| r.has_non_english_resources)
                .count(),
        }
    }

    /// Rebuild statistics from a previously written results CSV.
    pub fn from_csv_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results CSV {}", path.display()))?;
        let mut records = parse_csv(&contents).into_iter();
        let header = records.next().context("results CSV is empty")?;

        let column = |name: &str| {
            header
                .iter()
                .position(|h| h.trim() == name)
                .with_context(|| format!("results CSV is missing a `{}` column", name))
        };
        let status_col = column("status")?;
        let language_col = column("primary_language")?;
        let options_col = column("has_language_options")?;
        let resources_col = column("has_non_english_resources")?;

        let mut stats = Self::default();
        for record in records {
            let field = |i: usize| record.get(i).map(|s| s.trim()).unwrap_or("");
            stats.total += 1;
            let success = field(status_col) == "success";
            if success {
                stats.successful += 1;
                if field(language_col) == "en" {
                    stats.english_primary += 1;
                }
            }
            if field(options_col) == "true" {
                stats.with_language_options += 1;
            }
            if field(resources_col) == "true" {
                stats.with_non_english_resources += 1;
            }
        }
        Ok(stats)
    }

    /// Percentage of successful sites primarily in English, absent when
    /// nothing succeeded.
    pub fn english_percent(&self) -> Option<f64> {
        self.percent_of_successful(self.english_primary)
    }

    pub fn language_options_percent(&self) -> Option<f64> {
        self.percent_of_successful(self.with_language_options)
    }

    pub fn non_english_resources_percent(&self) -> Option<f64> {
        self.percent_of_successful(self.with_non_english_resources)
    }

    fn percent_of_successful(&self, count: usize) -> Option<f64> {
        if self.successful == 0 {
            return None;
        }
        Some(count as f64 / self.successful as f64 * 100.0)
    }
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Print the summary block for a batch.
pub fn print_summary(stats: &CoverageStats) {
    println!("\n{} Analysis results", style("→").cyan());
    println!("  Organizations analyzed:         {}", stats.total);
    println!("  Successfully analyzed:          {}", stats.successful);
    println!(
        "  Primarily in English:           {} ({} of successful)",
        stats.english_primary,
        format_percent(stats.english_percent())
    );
    println!(
        "  With language options:          {} ({} of successful)",
        stats.with_language_options,
        format_percent(stats.language_options_percent())
    );
    println!(
        "  With non-English resources:     {} ({} of successful)",
        stats.with_non_english_resources,
        format_percent(stats.non_english_resources_percent())
    );
}
