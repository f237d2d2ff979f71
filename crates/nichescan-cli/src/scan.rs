//! The `scan` command: build the keyword queue, run the scan loop, and
//! print the outcome.
//!
//! Ctrl-C does not kill the process mid-keyword; it raises a flag the scan
//! loop checks between keywords, so the checkpoint on disk stays consistent
//! and a re-run resumes where this one stopped.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nichescan_core::AppConfig;
use nichescan_scan::{
    load_discovered, merge_tasks, scan_with_client, CheckpointStore, ScanConfig, ScanOutcome,
    SortBy,
};
use nichescan_trends::TrendsClient;

/// How many report rows to echo to the terminal; the full set is in the CSV.
const TOP_RESULTS_SHOWN: usize = 25;

pub(crate) async fn run_scan_command(
    config: &AppConfig,
    sort_by: SortBy,
    seeds_override: Option<&Path>,
) -> anyhow::Result<()> {
    let seeds_path = seeds_override.unwrap_or(&config.seeds_path);
    let seeds = nichescan_core::load_seeds(seeds_path)?;
    let discovered = load_discovered(&config.discovered_path)?;

    let tasks = merge_tasks(seeds.tasks(), discovered);
    anyhow::ensure!(!tasks.is_empty(), "keyword queue is empty — nothing to scan");

    let client = TrendsClient::new(
        &config.serpapi_key,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_secs,
    )?;

    for path in [&config.checkpoint_path, &config.output_path] {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let store = CheckpointStore::new(config.checkpoint_path.clone());
    let scan_config = ScanConfig::from_app_config(config, sort_by);

    let shutdown = Arc::new(AtomicBool::new(false));
    let ctrlc_flag = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received — finishing the current keyword, then stopping");
            ctrlc_flag.store(true, Ordering::SeqCst);
        }
    });

    let started = chrono::Local::now();
    println!("=== niche keyword scan ===");
    println!("started:    {}", started.format("%Y-%m-%d %H:%M:%S"));
    println!("keywords:   {}", tasks.len());
    println!(
        "pacing:     {}s between keywords, checkpoint every {}",
        config.inter_request_delay_ms / 1000,
        config.checkpoint_interval
    );
    // Upper bound: a resumed run skips checkpointed keywords and finishes sooner.
    let est_secs = tasks.len() as u64 * config.inter_request_delay_ms / 1000;
    println!("est. time:  {}m {}s at full queue", est_secs / 60, est_secs % 60);
    if store.exists() {
        println!("checkpoint: found — resuming previous scan");
    }
    println!();

    let outcome = scan_with_client(&scan_config, &client, &tasks, &store, &shutdown).await?;

    print_outcome(&outcome, &scan_config, started);
    Ok(())
}

fn print_outcome(outcome: &ScanOutcome, config: &ScanConfig, started: chrono::DateTime<chrono::Local>) {
    let finished = chrono::Local::now();
    let elapsed = finished - started;

    println!();
    if outcome.interrupted {
        println!("=== scan interrupted ===");
        println!(
            "processed {} of {} keywords — re-run `nichescan scan` to resume",
            outcome.summary.scanned, outcome.summary.total
        );
        return;
    }

    println!("=== scan complete ===");
    println!("finished:   {}", finished.format("%Y-%m-%d %H:%M:%S"));
    println!("elapsed:    {}m {}s", elapsed.num_minutes(), elapsed.num_seconds() % 60);
    println!(
        "scanned:    {} ({} resumed from checkpoint, {} errors)",
        outcome.summary.scanned, outcome.summary.skipped, outcome.summary.errored
    );
    println!(
        "qualified:  {} of {} (growth >= {}% on any horizon)",
        outcome.summary.passed,
        outcome.summary.scanned,
        config.min_growth_threshold
    );
    println!("report:     {}", config.output_path.display());

    if outcome.report.is_empty() {
        return;
    }

    println!();
    println!("top {} results:", TOP_RESULTS_SHOWN.min(outcome.report.len()));
    println!(
        "{:<4} {:<30} {:<16} {:>8} {:>10} {:>10}",
        "#", "keyword", "category", "score", "1yr %", "5yr %"
    );
    for (i, row) in outcome.report.iter().take(TOP_RESULTS_SHOWN).enumerate() {
        println!(
            "{:<4} {:<30} {:<16} {:>8.2} {:>10.1} {:>10.1}",
            i + 1,
            row.keyword,
            row.category,
            row.recommendation_score,
            row.growth_1yr,
            row.growth_5yr
        );
    }

    let mut by_category: Vec<(String, usize)> = Vec::new();
    for row in &outcome.report {
        match by_category.iter_mut().find(|(name, _)| *name == row.category) {
            Some((_, count)) => *count += 1,
            None => by_category.push((row.category.clone(), 1)),
        }
    }
    by_category.sort_by(|a, b| b.1.cmp(&a.1));

    println!();
    println!("qualifying keywords by category:");
    for (category, count) in by_category {
        println!("  {category}: {count}");
    }
}
