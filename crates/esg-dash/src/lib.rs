//! esg-dash: static site builder for the apparel climate risk dashboard.
//!
//! This library backs the `esg-dash` binary:
//! - Exit codes for CLI operations
//! - Logging setup
//! - Site build (dataset → validation → HTML on disk)
//!
//! The binary entry point is in `main.rs`.

pub mod build;
pub mod error;
pub mod exit_codes;
pub mod logging;

pub use build::{build_site, load_dataset, BuildOptions, BuildOutcome, LoadedDataset};
pub use error::{DashError, Result};
pub use exit_codes::ExitCode;
