//! Error types for dataset loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or serializing a dataset.
///
/// Missing or malformed *content* is not an error here: absent arrays
/// deserialize to empty and are reported by validation instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("dataset file not found: {}", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable error code for structured reporting.
    pub fn code(&self) -> u32 {
        match self {
            Error::DatasetNotFound { .. } => 30,
            Error::Parse(_) => 31,
            Error::Io(_) => 32,
        }
    }
}
