//! Configuration and dataset path resolution.
//!
//! Resolution order: CLI arguments → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Where a file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// A resolved path and where it came from. `path` is `None` for built-in
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

impl Resolved {
    fn found(path: PathBuf, source: ConfigSource) -> Self {
        Self {
            path: Some(path),
            source,
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "ESG_DASH_CONFIG";
pub const ENV_CONFIG_DIR: &str = "ESG_DASH_CONFIG_DIR";
pub const ENV_DATASET_PATH: &str = "ESG_DASH_DATASET";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "config.json";

/// Application name for XDG directories.
const APP_NAME: &str = "esg-dash";

/// Resolve the dashboard config file.
///
/// 1. Explicit CLI path
/// 2. `ESG_DASH_CONFIG`
/// 3. `ESG_DASH_CONFIG_DIR` + `config.json`
/// 4. XDG config directory (`~/.config/esg-dash/config.json`)
/// 5. Built-in defaults
///
/// Explicit paths (1 and 2) are returned even when the file is missing, so
/// that loading reports the mistake instead of silently using defaults.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Resolved {
    resolve_config_path_with(cli_path, |key| std::env::var(key).ok(), xdg_config_dir())
}

/// Resolve the dataset file: CLI path, then `ESG_DASH_DATASET`, then the
/// built-in dataset.
pub fn resolve_dataset_path(cli_path: Option<&Path>) -> Resolved {
    resolve_dataset_path_with(cli_path, |key| std::env::var(key).ok())
}

fn resolve_config_path_with(
    cli_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    xdg_dir: Option<PathBuf>,
) -> Resolved {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return Resolved::found(path.to_path_buf(), ConfigSource::CliArgument);
    }

    // 2. Environment variable (direct path)
    if let Some(env_path) = env(ENV_CONFIG_PATH).filter(|p| !p.is_empty()) {
        return Resolved::found(PathBuf::from(env_path), ConfigSource::Environment);
    }

    // 3. Environment variable (config dir)
    if let Some(config_dir) = env(ENV_CONFIG_DIR).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            return Resolved::found(path, ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_dir {
        let path = dir.join(CONFIG_FILENAME);
        if path.exists() {
            return Resolved::found(path, ConfigSource::XdgConfig);
        }
    }

    // 5. Built-in default
    Resolved::default()
}

fn resolve_dataset_path_with(cli_path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Resolved {
    if let Some(path) = cli_path {
        return Resolved::found(path.to_path_buf(), ConfigSource::CliArgument);
    }
    if let Some(env_path) = env(ENV_DATASET_PATH).filter(|p| !p.is_empty()) {
        return Resolved::found(PathBuf::from(env_path), ConfigSource::Environment);
    }
    Resolved::default()
}

/// Get the XDG config directory for esg-dash.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
