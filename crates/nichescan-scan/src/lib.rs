//! Resilient batch-scanning engine for keyword trend research.
//!
//! Drives a keyword queue through the trends client one keyword at a time,
//! computes multi-horizon growth and a weighted recommendation score,
//! checkpoints progress to a CSV file so interrupted runs resume without
//! redoing work, and writes the final ranked report.

pub mod checkpoint;
pub mod error;
pub mod growth;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod threshold;
pub mod types;

pub use checkpoint::CheckpointStore;
pub use error::ScanError;
pub use growth::extract_profile;
pub use input::{load_discovered, merge_tasks};
pub use pipeline::{run_scan, scan_with_client, KeywordData};
pub use report::{finalize_results, write_report};
pub use score::{recommendation_score, ScoreWeights};
pub use threshold::passes_threshold;
pub use types::{GrowthProfile, ScanConfig, ScanOutcome, ScanResult, ScanSummary, SortBy};
