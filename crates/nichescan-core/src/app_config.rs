use std::path::PathBuf;

/// Horizon order for the score weight table: 1mo, 3mo, 6mo, 1yr, 5yr.
pub const WEIGHT_HORIZONS: [&str; 5] = ["1mo", "3mo", "6mo", "1yr", "5yr"];

#[derive(Clone)]
pub struct AppConfig {
    pub serpapi_key: String,
    pub log_level: String,
    pub seeds_path: PathBuf,
    pub discovered_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub output_path: PathBuf,
    pub geo: String,
    pub timeframe: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Unconditional pacing delay applied after every keyword, success or not.
    pub inter_request_delay_ms: u64,
    /// Pause between the time-series call and the best-effort related-queries call.
    pub related_delay_ms: u64,
    pub max_retries: u32,
    /// Fixed wait before each retry after a rate-limit response.
    pub retry_backoff_secs: u64,
    /// Checkpoint after every N processed keywords.
    pub checkpoint_interval: usize,
    /// Minimum growth (%) on any single horizon to qualify for the report.
    pub min_growth_threshold: f64,
    /// Upper clamp (%) for growth values; zero baselines report exactly this.
    pub max_growth_cap: f64,
    /// Per-horizon score weights in [`WEIGHT_HORIZONS`] order; must sum to 1.0.
    pub score_weights: [f64; 5],
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("serpapi_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("seeds_path", &self.seeds_path)
            .field("discovered_path", &self.discovered_path)
            .field("checkpoint_path", &self.checkpoint_path)
            .field("output_path", &self.output_path)
            .field("geo", &self.geo)
            .field("timeframe", &self.timeframe)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("related_delay_ms", &self.related_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("checkpoint_interval", &self.checkpoint_interval)
            .field("min_growth_threshold", &self.min_growth_threshold)
            .field("max_growth_cap", &self.max_growth_cap)
            .field("score_weights", &self.score_weights)
            .finish()
    }
}
