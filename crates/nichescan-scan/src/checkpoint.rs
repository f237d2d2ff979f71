//! Durable scan progress on disk.
//!
//! The checkpoint is a CSV file with the same schema as the final report.
//! Its presence is the sole signal that a prior run is being resumed.
//! Saves rewrite the file wholesale — idempotent and safe to call at any
//! cadence — via write-to-temp-then-rename so a crash mid-write can never
//! leave a truncated checkpoint behind.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::types::ScanResult;

pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the partial result set and the identities of already-processed
    /// keywords (succeeded or terminally failed — both occupy a slot).
    ///
    /// A missing checkpoint is not an error: returns empty state.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<(Vec<ScanResult>, HashSet<String>), ScanError> {
        if !self.path.exists() {
            return Ok((Vec::new(), HashSet::new()));
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| ScanError::Csv {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let mut results = Vec::new();
        for record in reader.deserialize::<ScanResult>() {
            let result = record.map_err(|e| ScanError::Csv {
                path: self.path.display().to_string(),
                source: e,
            })?;
            results.push(result);
        }

        let processed = results.iter().map(ScanResult::identity).collect();
        Ok((results, processed))
    }

    /// Overwrites the checkpoint with the full current result collection.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` if the temp file cannot be written or renamed
    /// into place.
    pub fn save(&self, results: &[ScanResult]) -> Result<(), ScanError> {
        let tmp_path = self.path.with_extension("csv.tmp");

        write_rows(&tmp_path, results)?;

        std::fs::rename(&tmp_path, &self.path).map_err(|e| ScanError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            rows = results.len(),
            "checkpoint saved"
        );
        Ok(())
    }

    /// Removes the checkpoint. Called only after the final report has been
    /// durably written. Missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns `ScanError` on any removal failure other than the file
    /// already being gone.
    pub fn clear(&self) -> Result<(), ScanError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScanError::Io {
                path: self.path.display().to_string(),
                source: e,
            }),
        }
    }
}

/// Serializes rows to a CSV file, header included.
pub(crate) fn write_rows(path: &Path, results: &[ScanResult]) -> Result<(), ScanError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ScanError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;

    for result in results {
        writer.serialize(result).map_err(|e| ScanError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| ScanError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nichescan_core::KeywordTask;

    fn sample_result(keyword: &str, score: f64) -> ScanResult {
        ScanResult {
            keyword: keyword.to_string(),
            category: "supplements".to_string(),
            current_interest: 72.0,
            growth_5yr: 1500.0,
            growth_1yr: 300.0,
            growth_6mo: 80.0,
            growth_3mo: 20.5,
            growth_1mo: -10.0,
            related_queries: "magnesium; sleep aid".to_string(),
            rising_queries: "magnesium glycinate dosage".to_string(),
            recommendation_score: score,
            error: None,
        }
    }

    fn failed_result(keyword: &str) -> ScanResult {
        ScanResult::failure(
            &KeywordTask {
                keyword: keyword.to_string(),
                category: "gut_health".to_string(),
            },
            "No data".to_string(),
        )
    }

    #[test]
    fn load_missing_checkpoint_is_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));

        let (results, processed) = store.load().unwrap();
        assert!(results.is_empty());
        assert!(processed.is_empty());
        assert!(!store.exists());
    }

    #[test]
    fn save_then_load_roundtrips_including_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));

        let rows = vec![sample_result("Magnesium Glycinate", 136.0), failed_result("sibo")];
        store.save(&rows).unwrap();

        let (loaded, processed) = store.load().unwrap();
        assert_eq!(loaded, rows);
        assert!(processed.contains("magnesium glycinate"));
        assert!(processed.contains("sibo"));
        assert_eq!(processed.len(), 2);
    }

    #[test]
    fn save_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));

        let rows = vec![sample_result("zinc", 10.0)];
        store.save(&rows).unwrap();
        let first = std::fs::read_to_string(store.path()).unwrap();
        store.save(&rows).unwrap();
        let second = std::fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
        let (loaded, _) = store.load().unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn save_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));

        store
            .save(&[
                sample_result("a", 1.0),
                sample_result("b", 2.0),
                sample_result("c", 3.0),
            ])
            .unwrap();
        store.save(&[sample_result("a", 1.0)]).unwrap();

        let (loaded, processed) = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(processed.len(), 1);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));
        store.save(&[sample_result("zinc", 10.0)]).unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["checkpoint.csv".to_string()]);
    }

    #[test]
    fn clear_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CheckpointStore::new(dir.path().join("checkpoint.csv"));

        store.save(&[sample_result("zinc", 10.0)]).unwrap();
        assert!(store.exists());
        store.clear().unwrap();
        assert!(!store.exists());
        // Second clear is a no-op, not an error.
        store.clear().unwrap();
    }
}
