//! Summary statistics from a previously written results CSV.

use std::path::Path;

use console::style;

use crate::report::{print_summary, CoverageStats};

pub fn cmd_stats(input: &Path) -> anyhow::Result<()> {
    let stats = CoverageStats::from_csv_file(input)?;
    println!(
        "{} Loaded {} results from {}",
        style("→").cyan(),
        stats.total,
        input.display()
    );
    print_summary(&stats);
    Ok(())
}
