//! Keyword queue assembly: discovered-keyword CSV input and the
//! case-insensitive merge with the seed list.

use std::path::Path;

use serde::Deserialize;

use nichescan_core::KeywordTask;

use crate::error::ScanError;

#[derive(Debug, Deserialize)]
struct DiscoveredRow {
    keyword: String,
    category: String,
}

/// Loads externally discovered keywords from a CSV with at least `keyword`
/// and `category` columns (extra columns are ignored). A missing file means
/// no discovery step has run — returns an empty list.
///
/// # Errors
///
/// Returns `ScanError` if the file exists but cannot be read or parsed.
pub fn load_discovered(path: &Path) -> Result<Vec<KeywordTask>, ScanError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| ScanError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut tasks = Vec::new();
    for record in reader.deserialize::<DiscoveredRow>() {
        let row = record.map_err(|e| ScanError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        tasks.push(KeywordTask {
            keyword: row.keyword,
            category: row.category,
        });
    }

    tracing::info!(
        path = %path.display(),
        count = tasks.len(),
        "loaded discovered keywords"
    );
    Ok(tasks)
}

/// Concatenates seed and discovered tasks, dropping case-insensitive
/// duplicate keywords and keeping the first occurrence (seeds win).
#[must_use]
pub fn merge_tasks(seed: Vec<KeywordTask>, discovered: Vec<KeywordTask>) -> Vec<KeywordTask> {
    let mut seen = std::collections::HashSet::new();
    seed.into_iter()
        .chain(discovered)
        .filter(|task| seen.insert(task.identity()))
        .collect()
}
