//! Dashboard configuration file.

use crate::resolve::{resolve_config_path, ConfigSource};
use esg_report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound(_) => 60,
            ConfigError::Io { .. } => 61,
            ConfigError::Parse { .. } => 62,
            ConfigError::VersionMismatch { .. } => 63,
            ConfigError::InvalidValue { .. } => 64,
        }
    }
}

/// Static build settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory the page is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Page file name inside `output_dir`.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Public base path the site is served under.
    #[serde(default = "default_base_path")]
    pub base_path: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_file_name() -> String {
    "index.html".to_string()
}

fn default_base_path() -> Option<String> {
    Some("/sri-lanka-apparel-dashboard-/".to_string())
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_name: default_file_name(),
            base_path: default_base_path(),
        }
    }
}

impl BuildConfig {
    /// Full path of the generated page.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// Complete dashboard configuration (`config.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_schema_version() -> String {
    crate::CONFIG_SCHEMA_VERSION.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            build: BuildConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate configuration JSON. `path` is used in error messages.
    pub fn from_json(json: &str, path: &Path) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content, path)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Semantic checks the type system cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.schema_version != crate::CONFIG_SCHEMA_VERSION {
            return Err(ConfigError::VersionMismatch {
                expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
                actual: self.schema_version.clone(),
            });
        }

        let file_name = &self.build.file_name;
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "build.file_name".to_string(),
                message: format!("must be a plain file name, got {file_name:?}"),
            });
        }

        if let Some(base) = &self.build.base_path {
            if !base.starts_with('/') || !base.ends_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: "build.base_path".to_string(),
                    message: format!("must start and end with '/', got {base:?}"),
                });
            }
        }

        for (name, lib) in &self.report.cdn_config.libraries {
            if let Some(sri) = &lib.sri {
                if !["sha256-", "sha384-", "sha512-"].iter().any(|p| sri.starts_with(p)) {
                    return Err(ConfigError::InvalidValue {
                        field: format!("report.cdn_config.libraries.{name}.sri"),
                        message: format!("must be a sha256-, sha384- or sha512- digest, got {sri:?}"),
                    });
                }
            }
        }

        if self.report.title.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "report.title".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Report configuration with the build base path applied, unless the
    /// report section sets its own.
    pub fn effective_report(&self) -> ReportConfig {
        let mut report = self.report.clone();
        if report.base_path.is_none() {
            report.base_path = self.build.base_path.clone();
        }
        report
    }
}

/// A loaded configuration and its provenance.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve and load the dashboard configuration.
pub fn load_config(cli_path: Option<&Path>) -> ConfigResult<LoadedConfig> {
    let resolved = resolve_config_path(cli_path);
    let config = match &resolved.path {
        Some(path) => {
            let config = DashboardConfig::from_file(path)?;
            info!(path = %path.display(), source = %resolved.source, "Loaded config");
            config
        }
        None => {
            debug!("No config file found, using defaults");
            DashboardConfig::default()
        }
    };
    Ok(LoadedConfig {
        config,
        path: resolved.path,
        source: resolved.source,
    })
}
