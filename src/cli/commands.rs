//! CLI commands implementation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::orchestrator::DEFAULT_WORKERS;

mod analyze;
mod stats;

use analyze::cmd_analyze;
use stats::cmd_stats;

#[derive(Parser)]
#[command(name = "langcover")]
#[command(about = "Website language accessibility analyzer")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every organization site and write the result files
    Analyze {
        /// CSV file with at least name and url columns
        #[arg(short, long, default_value = "organizations.csv")]
        input: PathBuf,
        /// Directory for the result files
        #[arg(short, long, default_value = "generated")]
        output_dir: PathBuf,
        /// Number of concurrent fetch workers
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,
        /// Analyze only the first N organizations (0 = all)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Recompute summary statistics from a results CSV
    Stats {
        /// Results CSV produced by analyze
        #[arg(short, long, default_value = "generated/language_analysis.csv")]
        input: PathBuf,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            output_dir,
            workers,
            limit,
        } => cmd_analyze(&input, &output_dir, workers, limit).await,
        Commands::Stats { input } => cmd_stats(&input),
    }
}
