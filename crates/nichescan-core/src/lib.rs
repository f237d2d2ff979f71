use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod seeds;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use seeds::{load_seeds, SeedCategory, SeedsFile};

/// One keyword queued for scanning. Identity is the lowercased keyword;
/// two tasks with the same identity are the same keyword regardless of
/// category or casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTask {
    pub keyword: String,
    pub category: String,
}

impl KeywordTask {
    /// Case-insensitive identity used for deduplication and resume tracking.
    #[must_use]
    pub fn identity(&self) -> String {
        self.keyword.to_lowercase()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seeds file {path}: {source}")]
    SeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seeds file: {0}")]
    SeedsFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
