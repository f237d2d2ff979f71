use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited fetching \"{keyword}\" (retry after {retry_after_secs}s)")]
    RateLimited {
        keyword: String,
        retry_after_secs: u64,
    },

    #[error("no interest data returned for \"{keyword}\"")]
    NoData { keyword: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("max retries exceeded for \"{keyword}\" after {attempts} attempts")]
    MaxRetriesExceeded { keyword: String, attempts: u32 },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl TrendsError {
    /// `true` for errors that end processing of the current keyword: the
    /// orchestrator records them on the result row and moves on. Retryable
    /// rate limits are the only non-terminal variant.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TrendsError::RateLimited { .. })
    }
}
