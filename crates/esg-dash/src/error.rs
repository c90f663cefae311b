//! CLI-level errors and their exit codes.

use crate::exit_codes::ExitCode;
use esg_config::ConfigError;
use esg_report::ReportError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashError>;

/// Errors surfaced by the esg-dash commands.
#[derive(Error, Debug)]
pub enum DashError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("dataset error: {0}")]
    Dataset(#[from] esg_common::Error),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("dataset failed validation: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed { errors: usize, warnings: usize },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DashError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DashError::Config(_) | DashError::Dataset(_) => ExitCode::ConfigError,
            DashError::Report(ReportError::IoError(_)) => ExitCode::IoError,
            DashError::Report(_) | DashError::Serialize(_) => ExitCode::InternalError,
            DashError::ValidationFailed { .. } => ExitCode::ValidationFailed,
            DashError::Write { .. } => ExitCode::IoError,
        }
    }
}
