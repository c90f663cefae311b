//! Static site build: resolve inputs, validate, render, write.

use crate::error::{DashError, Result};
use esg_common::Dataset;
use esg_config::{resolve_dataset_path, validate_dataset, ConfigSource, DashboardConfig, ValidationReport};
use esg_report::{ReportGenerator, ReportTheme};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A dataset and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve and load the dataset: CLI path, `ESG_DASH_DATASET`, or the
/// built-in dataset.
pub fn load_dataset(cli_path: Option<&Path>) -> Result<LoadedDataset> {
    let resolved = resolve_dataset_path(cli_path);
    let dataset = match &resolved.path {
        Some(path) => {
            let dataset = Dataset::load(path)?;
            info!(path = %path.display(), source = %resolved.source, "Loaded dataset");
            dataset
        }
        None => Dataset::builtin(),
    };
    Ok(LoadedDataset {
        dataset,
        path: resolved.path,
        source: resolved.source,
    })
}

/// Command-line overrides for a build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub output_dir: Option<PathBuf>,
    /// Public base path; an empty string removes it.
    pub base_path: Option<String>,
    pub theme: Option<ReportTheme>,
    pub title: Option<String>,
    /// Abort before writing when validation finds errors.
    pub strict: bool,
}

impl BuildOptions {
    /// Apply the overrides to a configuration and re-check it.
    pub fn apply(&self, config: &DashboardConfig) -> Result<DashboardConfig> {
        let mut config = config.clone();
        if let Some(dir) = &self.output_dir {
            config.build.output_dir = dir.clone();
        }
        if let Some(base) = &self.base_path {
            config.build.base_path = (!base.is_empty()).then(|| base.clone());
            config.report.base_path = None;
        }
        if let Some(theme) = self.theme {
            config.report.theme = theme;
        }
        if let Some(title) = &self.title {
            config.report.title = title.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub path: PathBuf,
    pub bytes: usize,
    pub report: ValidationReport,
}

/// Validate the dataset, render the page, and write it under the configured
/// output directory.
pub fn build_site(config: &DashboardConfig, dataset: &Dataset, options: &BuildOptions) -> Result<BuildOutcome> {
    let config = options.apply(config)?;

    let report = validate_dataset(dataset);
    if report.has_errors() {
        if options.strict {
            return Err(DashError::ValidationFailed {
                errors: report.errors().count(),
                warnings: report.warnings().count(),
            });
        }
        warn!(summary = %report.summary(), "Dataset has validation errors; affected charts will show gaps");
    }

    let generator = ReportGenerator::new(config.effective_report());
    let html = generator.generate(dataset)?;

    let dir = &config.build.output_dir;
    std::fs::create_dir_all(dir).map_err(|source| DashError::Write {
        path: dir.clone(),
        source,
    })?;
    let path = config.build.output_path();
    std::fs::write(&path, &html).map_err(|source| DashError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = html.len(), "Wrote dashboard");
    Ok(BuildOutcome {
        path,
        bytes: html.len(),
        report,
    })
}
