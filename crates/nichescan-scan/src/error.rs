use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error for {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
