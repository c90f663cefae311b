//! Exit codes for the esg-dash CLI.
//!
//! Exit code ranges:
//! - 0-1: Outcomes (the dataset is clean, or has warnings only)
//! - 10-19: User/input errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use esg_config::ValidationReport;

/// Exit codes for esg-dash operations.
///
/// These codes are a stable contract for CI scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success with no validation findings
    Clean = 0,

    /// Success, but validation produced warnings
    Warnings = 1,

    /// Invalid arguments
    ArgsError = 10,

    /// Config or dataset file could not be loaded
    ConfigError = 11,

    /// Dataset validation found errors
    ValidationFailed = 12,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error writing output
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Outcome of a validation run.
    pub fn from_report(report: &ValidationReport) -> Self {
        if report.has_errors() {
            ExitCode::ValidationFailed
        } else if report.is_clean() {
            ExitCode::Clean
        } else {
            ExitCode::Warnings
        }
    }

    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Warnings => "OK_WARNINGS",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::ValidationFailed => "ERR_VALIDATION",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
