use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nichescan_core::{AppConfig, KeywordTask};

use crate::score::ScoreWeights;

/// Growth percentages at each look-back horizon for one keyword, derived
/// deterministically from its interest series. Clamped on the upside only;
/// samples are non-negative so −100% is the implicit floor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrowthProfile {
    pub current: f64,
    pub growth_1mo: f64,
    pub growth_3mo: f64,
    pub growth_6mo: f64,
    pub growth_1yr: f64,
    pub growth_5yr: f64,
}

/// One row of the checkpoint and report files. Exactly one exists per
/// processed keyword; `error` is set (and the metrics left neutral) when
/// the fetch failed terminally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub keyword: String,
    pub category: String,
    pub current_interest: f64,
    pub growth_5yr: f64,
    pub growth_1yr: f64,
    pub growth_6mo: f64,
    pub growth_3mo: f64,
    pub growth_1mo: f64,
    pub related_queries: String,
    pub rising_queries: String,
    pub recommendation_score: f64,
    pub error: Option<String>,
}

impl ScanResult {
    /// Case-insensitive identity, matching [`KeywordTask::identity`].
    #[must_use]
    pub fn identity(&self) -> String {
        self.keyword.to_lowercase()
    }

    /// Row for a keyword whose fetch failed terminally: neutral metrics,
    /// `error` set. The row occupies a processed slot so the keyword is
    /// never retried on resume.
    #[must_use]
    pub fn failure(task: &KeywordTask, error: String) -> Self {
        Self {
            keyword: task.keyword.clone(),
            category: task.category.clone(),
            current_interest: 0.0,
            growth_5yr: 0.0,
            growth_1yr: 0.0,
            growth_6mo: 0.0,
            growth_3mo: 0.0,
            growth_1mo: 0.0,
            related_queries: String::new(),
            rising_queries: String::new(),
            recommendation_score: 0.0,
            error: Some(error),
        }
    }

    /// Growth values in threshold-check order (5yr first, as reported).
    #[must_use]
    pub fn growth_horizons(&self) -> [f64; 5] {
        [
            self.growth_5yr,
            self.growth_1yr,
            self.growth_6mo,
            self.growth_3mo,
            self.growth_1mo,
        ]
    }
}

/// Final report sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Weighted recommendation score (the default full-scan ranking).
    #[default]
    Score,
    /// Raw one-year growth, for validation-style runs.
    Growth1Yr,
}

/// Immutable scan parameters handed to the orchestrator at construction.
/// Tests use tiny or zero delays; production values come from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Unconditional pacing delay applied after every keyword, success or not.
    pub inter_request_delay: Duration,
    /// Pause between the series fetch and the best-effort related fetch.
    pub related_delay: Duration,
    /// Checkpoint after every N processed keywords.
    pub checkpoint_interval: usize,
    pub min_growth_threshold: f64,
    pub max_growth_cap: f64,
    pub weights: ScoreWeights,
    pub geo: String,
    pub timeframe: String,
    pub output_path: PathBuf,
    pub sort_by: SortBy,
}

impl ScanConfig {
    #[must_use]
    pub fn from_app_config(cfg: &AppConfig, sort_by: SortBy) -> Self {
        Self {
            inter_request_delay: Duration::from_millis(cfg.inter_request_delay_ms),
            related_delay: Duration::from_millis(cfg.related_delay_ms),
            checkpoint_interval: cfg.checkpoint_interval.max(1),
            min_growth_threshold: cfg.min_growth_threshold,
            max_growth_cap: cfg.max_growth_cap,
            weights: ScoreWeights::from_table(cfg.score_weights),
            geo: cfg.geo.clone(),
            timeframe: cfg.timeframe.clone(),
            output_path: cfg.output_path.clone(),
            sort_by,
        }
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Entries in the input queue.
    pub total: usize,
    /// Keywords already processed in the loaded checkpoint.
    pub skipped: usize,
    /// Rows in the final collection (checkpointed + newly produced).
    pub scanned: usize,
    /// Errorless rows meeting the growth threshold on any horizon.
    pub passed: usize,
    /// Rows with a terminal fetch error.
    pub errored: usize,
}

/// What a scan run produced.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The full result collection, in processing order.
    pub results: Vec<ScanResult>,
    /// The ranked qualifying rows written to the report; empty when the
    /// run was interrupted before completion.
    pub report: Vec<ScanResult>,
    pub summary: ScanSummary,
    /// `true` when a shutdown signal stopped the run early. The last
    /// periodic checkpoint remains on disk as the durable state.
    pub interrupted: bool,
}
