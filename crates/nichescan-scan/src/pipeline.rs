//! The scan orchestrator: sequential driver loop over the keyword queue.
//!
//! Strictly one keyword in flight at a time — the provider enforces an
//! implicit rate limit that parallel requests would violate. The only
//! suspension points are the unconditional pacing delay after each keyword
//! and the retry backoff inside the client.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use nichescan_core::KeywordTask;
use nichescan_trends::{RelatedQueries, TimeSeries, TrendsClient, TrendsError};

use crate::checkpoint::CheckpointStore;
use crate::error::ScanError;
use crate::growth::extract_profile;
use crate::report::{finalize_results, write_report};
use crate::score::recommendation_score;
use crate::threshold::passes_threshold;
use crate::types::{ScanConfig, ScanOutcome, ScanResult, ScanSummary};

/// Stored error messages are truncated to this many characters; full
/// details go to the log instead.
const ERROR_MESSAGE_LIMIT: usize = 50;

/// Everything fetched for one keyword: the primary interest series plus the
/// best-effort related-terms signal.
#[derive(Debug, Clone)]
pub struct KeywordData {
    pub series: TimeSeries,
    pub related: RelatedQueries,
}

/// Runs the scan over `tasks`, resuming from `store` if a checkpoint exists.
///
/// `fetch` produces the [`KeywordData`] for one keyword; the production
/// wrapper is [`scan_with_client`]. Taking the fetch step as a parameter
/// keeps the loop's resume, cadence, and interruption behavior testable
/// without a network or a clock.
///
/// Per task, in input order, skipping identities already processed:
/// 1. fetch; terminal failures become an error row, never abort the batch;
/// 2. append the row; checkpoint every `checkpoint_interval` processed;
/// 3. sleep the pacing delay (also after failures);
/// 4. between tasks, honor `shutdown`: stop without writing the report and
///    leave the last periodic checkpoint as the durable state.
///
/// On exhausting the queue: final checkpoint save, sort + filter, write the
/// report, clear the checkpoint.
///
/// # Errors
///
/// Returns `ScanError` only for checkpoint/report file failures. Fetch
/// failures are recorded per keyword.
pub async fn run_scan<F, Fut>(
    config: &ScanConfig,
    tasks: &[KeywordTask],
    store: &CheckpointStore,
    shutdown: &AtomicBool,
    mut fetch: F,
) -> Result<ScanOutcome, ScanError>
where
    F: FnMut(KeywordTask) -> Fut,
    Fut: Future<Output = Result<KeywordData, TrendsError>>,
{
    let (mut results, processed) = store.load()?;

    let total = tasks.len();
    let skipped = tasks
        .iter()
        .filter(|t| processed.contains(&t.identity()))
        .count();

    if skipped > 0 {
        tracing::info!(
            skipped,
            total,
            "resuming from checkpoint — already-processed keywords will not be re-fetched"
        );
    }

    // Guards both against checkpointed keywords and accidental duplicates
    // in the input queue, so the final collection has one row per identity.
    let mut seen: HashSet<String> = processed;

    let mut done = skipped;
    let mut since_checkpoint = 0usize;
    let mut interrupted = false;
    // ScanConfig is constructible with a zero interval; treat it as 1.
    let checkpoint_interval = config.checkpoint_interval.max(1);

    for task in tasks {
        if !seen.insert(task.identity()) {
            continue;
        }

        if shutdown.load(Ordering::SeqCst) {
            tracing::warn!(
                done,
                total,
                "shutdown requested — stopping; re-run to resume from the last checkpoint"
            );
            interrupted = true;
            break;
        }

        done += 1;
        tracing::info!(
            progress = format!("{done}/{total}"),
            keyword = %task.keyword,
            category = %task.category,
            "scanning keyword"
        );

        let result = match fetch(task.clone()).await {
            Ok(data) => build_result(config, task, &data),
            Err(err) => {
                tracing::error!(keyword = %task.keyword, error = %err, "keyword failed");
                ScanResult::failure(task, truncate_error(&err.to_string()))
            }
        };

        if result.error.is_none() {
            tracing::info!(
                keyword = %task.keyword,
                growth_1yr = result.growth_1yr,
                growth_5yr = result.growth_5yr,
                score = result.recommendation_score,
                qualifies = passes_threshold(&result, config.min_growth_threshold),
                "keyword scanned"
            );
        }

        results.push(result);
        since_checkpoint += 1;

        if since_checkpoint % checkpoint_interval == 0 {
            store.save(&results)?;
        }

        // Unconditional pacing, applied after every keyword regardless of
        // outcome.
        if !config.inter_request_delay.is_zero() {
            tokio::time::sleep(config.inter_request_delay).await;
        }
    }

    let report = if interrupted {
        Vec::new()
    } else {
        store.save(&results)?;
        let report = finalize_results(&results, config.min_growth_threshold, config.sort_by);
        write_report(&config.output_path, &report)?;
        store.clear()?;
        report
    };

    let summary = ScanSummary {
        total,
        skipped,
        scanned: results.len(),
        passed: results
            .iter()
            .filter(|r| passes_threshold(r, config.min_growth_threshold))
            .count(),
        errored: results.iter().filter(|r| r.error.is_some()).count(),
    };

    Ok(ScanOutcome {
        results,
        report,
        summary,
        interrupted,
    })
}

/// Runs the scan against the real trends client.
///
/// The per-keyword fetch gets the interest series (rate-limit retries
/// happen inside the client), pauses briefly, then attempts the related
/// queries; related failures are logged and swallowed — they never
/// escalate the keyword to an error.
///
/// # Errors
///
/// Same as [`run_scan`].
pub async fn scan_with_client(
    config: &ScanConfig,
    client: &TrendsClient,
    tasks: &[KeywordTask],
    store: &CheckpointStore,
    shutdown: &AtomicBool,
) -> Result<ScanOutcome, ScanError> {
    run_scan(config, tasks, store, shutdown, |task| {
        async move {
            let series = client
                .fetch_interest_over_time(&task.keyword, &config.geo, &config.timeframe)
                .await?;

            if !config.related_delay.is_zero() {
                tokio::time::sleep(config.related_delay).await;
            }

            let related = match client.fetch_related_queries(&task.keyword, &config.geo).await {
                Ok(related) => related,
                Err(err) => {
                    tracing::debug!(
                        keyword = %task.keyword,
                        error = %err,
                        "related queries failed — continuing without"
                    );
                    RelatedQueries::default()
                }
            };

            Ok(KeywordData { series, related })
        }
    })
    .await
}

/// Builds the success row: growth profile, related-query strings, score.
fn build_result(config: &ScanConfig, task: &KeywordTask, data: &KeywordData) -> ScanResult {
    let profile = extract_profile(&data.series, config.max_growth_cap);

    ScanResult {
        keyword: task.keyword.clone(),
        category: task.category.clone(),
        current_interest: profile.current,
        growth_5yr: profile.growth_5yr,
        growth_1yr: profile.growth_1yr,
        growth_6mo: profile.growth_6mo,
        growth_3mo: profile.growth_3mo,
        growth_1mo: profile.growth_1mo,
        related_queries: data.related.top.join("; "),
        rising_queries: data.related.rising.join("; "),
        recommendation_score: recommendation_score(&profile, &config.weights),
        error: None,
    }
}

fn truncate_error(message: &str) -> String {
    message.chars().take(ERROR_MESSAGE_LIMIT).collect()
}
