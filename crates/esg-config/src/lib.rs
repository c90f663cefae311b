//! ESG dashboard configuration loading and dataset validation.
//!
//! This crate provides:
//! - Typed build and report configuration (`config.json`)
//! - Path resolution (CLI → env → XDG → defaults) for config and dataset
//! - Dataset contract validation against the chart bindings

pub mod config;
pub mod resolve;
pub mod validate;

pub use config::{load_config, BuildConfig, ConfigError, ConfigResult, DashboardConfig, LoadedConfig};
pub use resolve::{resolve_config_path, resolve_dataset_path, ConfigSource, Resolved};
pub use validate::{validate_dataset, Severity, ValidationIssue, ValidationReport};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
