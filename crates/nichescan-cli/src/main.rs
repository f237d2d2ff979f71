mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use nichescan_scan::SortBy;

#[derive(Debug, Parser)]
#[command(name = "nichescan")]
#[command(about = "Batch keyword trend scanner for niche research")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan the keyword queue, score it, and write the qualifying report.
    Scan {
        /// Ranking order for the final report.
        #[arg(long, value_enum, default_value = "score")]
        sort_by: SortOrder,

        /// Seed keyword file, overriding NICHESCAN_SEEDS_PATH.
        #[arg(long)]
        seeds: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    /// Weighted recommendation score, highest first.
    Score,
    /// One-year growth, highest first.
    Growth,
}

impl From<SortOrder> for SortBy {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Score => SortBy::Score,
            SortOrder::Growth => SortBy::Growth1Yr,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse before reading any configuration so `--help` and argument
    // errors work in an unconfigured environment.
    let cli = Cli::parse();

    let config = nichescan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Scan { sort_by, seeds } => {
            scan::run_scan_command(&config, sort_by.into(), seeds.as_deref()).await
        }
    }
}
