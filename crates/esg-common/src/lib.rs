//! Shared types for the ESG dashboard.
//!
//! This crate provides:
//! - The dataset model and the built-in mock dataset
//! - Chart bindings (the data-shape contract between dataset and charts)
//! - Headline KPI derivation
//! - Number formatting for display

pub mod binding;
pub mod dataset;
pub mod error;
pub mod format;
pub mod headline;
pub mod series;

pub use binding::{ChartBinding, ChartKind, SeriesBinding, CHART_BINDINGS};
pub use dataset::{
    CategoryShare, Dataset, OpportunityRecord, RiskRecord, SkipScope, SkippedInput, TimeSeriesPoint,
};
pub use error::{Error, Result};
pub use headline::{derive_headlines, HeadlineMetric, HeadlineTone, Icon};

/// Schema version of the dataset file format.
pub const DATASET_SCHEMA_VERSION: &str = "1.0.0";
