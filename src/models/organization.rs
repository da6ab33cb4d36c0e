//! Organization input records.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::csv::parse_csv;

/// An organization to analyze. The URL must be absolute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    pub url: String,
}

/// Load organizations from a CSV file with at least `name` and `url` columns.
///
/// A missing file or missing columns is fatal; rows without a URL are
/// skipped with a warning.
pub fn load_organizations(path: &Path) -> anyhow::Result<Vec<Organization>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read organization list {}", path.display()))?;
    parse_organizations(&contents)
        .with_context(|| format!("failed to parse organization list {}", path.display()))
}

fn parse_organizations(contents: &str) -> anyhow::Result<Vec<Organization>> {
    let mut records = parse_csv(contents).into_iter();
    let header = records.next().context("organization list is empty")?;

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .with_context(|| format!("organization list is missing a `{}` column", name))
    };
    let name_col = column("name")?;
    let url_col = column("url")?;

    let mut organizations = Vec::new();
    for record in records {
        let name = record.get(name_col).map(|s| s.trim()).unwrap_or("");
        let url = record.get(url_col).map(|s| s.trim()).unwrap_or("");
        if url.is_empty() {
            warn!("skipping organization row without a url: {:?}", record);
            continue;
        }
        if url::Url::parse(url).is_err() {
            warn!("skipping organization {:?}: url {:?} is not absolute", name, url);
            continue;
        }
        organizations.push(Organization {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    Ok(organizations)
}
