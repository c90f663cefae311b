//! Error types for report generation.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur during report generation.
///
/// Bad dataset content is not an error: it renders as empty visuals.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Dataset load error.
    #[error("failed to load dataset: {0}")]
    DatasetError(#[from] esg_common::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// Stable error code for structured reporting.
    pub fn code(&self) -> u32 {
        match self {
            ReportError::DatasetError(e) => e.code(),
            ReportError::JsonError(_) => 40,
            ReportError::IoError(_) => 41,
        }
    }
}
