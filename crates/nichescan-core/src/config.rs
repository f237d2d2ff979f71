use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let serpapi_key = require("SERPAPI_KEY")?;

    let log_level = or_default("NICHESCAN_LOG_LEVEL", "info");
    let seeds_path = PathBuf::from(or_default("NICHESCAN_SEEDS_PATH", "./config/seeds.yaml"));
    let discovered_path = PathBuf::from(or_default(
        "NICHESCAN_DISCOVERED_PATH",
        "./data/discovered_keywords.csv",
    ));
    let checkpoint_path = PathBuf::from(or_default(
        "NICHESCAN_CHECKPOINT_PATH",
        "./data/scan_checkpoint.csv",
    ));
    let output_path = PathBuf::from(or_default(
        "NICHESCAN_OUTPUT_PATH",
        "./data/scan_results.csv",
    ));

    let geo = or_default("NICHESCAN_GEO", "US");
    let timeframe = or_default("NICHESCAN_TIMEFRAME", "today 5-y");
    let user_agent = or_default(
        "NICHESCAN_USER_AGENT",
        "nichescan/0.1 (keyword-trend-research)",
    );

    let request_timeout_secs = parse_u64("NICHESCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let inter_request_delay_ms = parse_u64("NICHESCAN_INTER_REQUEST_DELAY_MS", "18000")?;
    let related_delay_ms = parse_u64("NICHESCAN_RELATED_DELAY_MS", "2000")?;
    let max_retries = parse_u32("NICHESCAN_MAX_RETRIES", "3")?;
    let retry_backoff_secs = parse_u64("NICHESCAN_RETRY_BACKOFF_SECS", "45")?;
    let checkpoint_interval = parse_usize("NICHESCAN_CHECKPOINT_INTERVAL", "5")?;
    let min_growth_threshold = parse_f64("NICHESCAN_MIN_GROWTH_THRESHOLD", "300")?;
    let max_growth_cap = parse_f64("NICHESCAN_MAX_GROWTH_CAP", "10000")?;

    let score_weights = parse_weights(&or_default(
        "NICHESCAN_SCORE_WEIGHTS",
        "0.30,0.25,0.20,0.15,0.10",
    ))?;

    if checkpoint_interval == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NICHESCAN_CHECKPOINT_INTERVAL".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    if max_growth_cap <= 0.0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NICHESCAN_MAX_GROWTH_CAP".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(AppConfig {
        serpapi_key,
        log_level,
        seeds_path,
        discovered_path,
        checkpoint_path,
        output_path,
        geo,
        timeframe,
        user_agent,
        request_timeout_secs,
        inter_request_delay_ms,
        related_delay_ms,
        max_retries,
        retry_backoff_secs,
        checkpoint_interval,
        min_growth_threshold,
        max_growth_cap,
        score_weights,
    })
}

/// Parse a comma-separated weight list into the fixed five-horizon table.
///
/// The table must have exactly five non-negative entries (1mo, 3mo, 6mo,
/// 1yr, 5yr) and sum to 1.0 within a small tolerance.
fn parse_weights(raw: &str) -> Result<[f64; 5], ConfigError> {
    let var = "NICHESCAN_SCORE_WEIGHTS";

    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("\"{}\": {e}", p.trim()),
                })
        })
        .collect::<Result<_, _>>()?;

    let weights: [f64; 5] = parts
        .try_into()
        .map_err(|v: Vec<f64>| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected 5 weights (1mo,3mo,6mo,1yr,5yr), got {}", v.len()),
        })?;

    if weights.iter().any(|w| *w < 0.0) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "weights must be non-negative".to_string(),
        });
    }

    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 1e-6 {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("weights must sum to 1.0, got {sum}"),
        });
    }

    Ok(weights)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SERPAPI_KEY", "test-key");
        m
    }

    #[test]
    fn build_app_config_fails_without_serpapi_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SERPAPI_KEY"),
            "expected MissingEnvVar(SERPAPI_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.geo, "US");
        assert_eq!(cfg.timeframe, "today 5-y");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.inter_request_delay_ms, 18_000);
        assert_eq!(cfg.related_delay_ms, 2000);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_secs, 45);
        assert_eq!(cfg.checkpoint_interval, 5);
        assert!((cfg.min_growth_threshold - 300.0).abs() < f64::EPSILON);
        assert!((cfg.max_growth_cap - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(cfg.score_weights, [0.30, 0.25, 0.20, 0.15, 0.10]);
    }

    #[test]
    fn inter_request_delay_ms_override() {
        let mut map = full_env();
        map.insert("NICHESCAN_INTER_REQUEST_DELAY_MS", "250");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.inter_request_delay_ms, 250);
    }

    #[test]
    fn inter_request_delay_ms_invalid() {
        let mut map = full_env();
        map.insert("NICHESCAN_INTER_REQUEST_DELAY_MS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_INTER_REQUEST_DELAY_MS"),
            "expected InvalidEnvVar(NICHESCAN_INTER_REQUEST_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn max_retries_override() {
        let mut map = full_env();
        map.insert("NICHESCAN_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn checkpoint_interval_zero_rejected() {
        let mut map = full_env();
        map.insert("NICHESCAN_CHECKPOINT_INTERVAL", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_CHECKPOINT_INTERVAL"),
            "expected InvalidEnvVar(NICHESCAN_CHECKPOINT_INTERVAL), got: {result:?}"
        );
    }

    #[test]
    fn max_growth_cap_must_be_positive() {
        let mut map = full_env();
        map.insert("NICHESCAN_MAX_GROWTH_CAP", "0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_MAX_GROWTH_CAP"),
            "expected InvalidEnvVar(NICHESCAN_MAX_GROWTH_CAP), got: {result:?}"
        );
    }

    #[test]
    fn weights_override_accepted() {
        let mut map = full_env();
        map.insert("NICHESCAN_SCORE_WEIGHTS", "0.2, 0.2, 0.2, 0.2, 0.2");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.score_weights, [0.2, 0.2, 0.2, 0.2, 0.2]);
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut map = full_env();
        map.insert("NICHESCAN_SCORE_WEIGHTS", "0.5,0.5,0.5,0.5,0.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_SCORE_WEIGHTS"),
            "expected InvalidEnvVar(NICHESCAN_SCORE_WEIGHTS), got: {result:?}"
        );
    }

    #[test]
    fn weights_wrong_arity_rejected() {
        let mut map = full_env();
        map.insert("NICHESCAN_SCORE_WEIGHTS", "0.5,0.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_SCORE_WEIGHTS"),
            "expected InvalidEnvVar(NICHESCAN_SCORE_WEIGHTS), got: {result:?}"
        );
    }

    #[test]
    fn weights_negative_rejected() {
        let mut map = full_env();
        map.insert("NICHESCAN_SCORE_WEIGHTS", "1.2,-0.2,0.0,0.0,0.0");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_SCORE_WEIGHTS"),
            "expected InvalidEnvVar(NICHESCAN_SCORE_WEIGHTS), got: {result:?}"
        );
    }

    #[test]
    fn weights_unparseable_rejected() {
        let mut map = full_env();
        map.insert("NICHESCAN_SCORE_WEIGHTS", "a,b,c,d,e");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NICHESCAN_SCORE_WEIGHTS"),
            "expected InvalidEnvVar(NICHESCAN_SCORE_WEIGHTS), got: {result:?}"
        );
    }

    #[test]
    fn min_growth_threshold_override() {
        let mut map = full_env();
        map.insert("NICHESCAN_MIN_GROWTH_THRESHOLD", "150.5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!((cfg.min_growth_threshold - 150.5).abs() < f64::EPSILON);
    }

    #[test]
    fn paths_default_and_override() {
        let mut map = full_env();
        map.insert("NICHESCAN_CHECKPOINT_PATH", "/tmp/ck.csv");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.checkpoint_path.to_string_lossy(), "/tmp/ck.csv");
        assert_eq!(
            cfg.seeds_path.to_string_lossy(),
            "./config/seeds.yaml"
        );
    }
}
