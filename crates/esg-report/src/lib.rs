//! HTML dashboard generator for ESG sustainability datasets.
//!
//! Generates a single self-contained HTML page from a [`esg_common::Dataset`].
//!
//! # Features
//!
//! - **Single-file output**: one HTML page with CDN-loaded chart assets
//! - **CDN pinning**: libraries use pinned versions with SRI hashes
//! - **Dark mode**: a client-side switch re-themes the page and its charts
//! - **Graceful degradation**: absent data renders as empty charts and
//!   "Not provided" fields, never as an error
//!
//! # Sections
//!
//! - Headlines: GHG total, water usage, waste recycled, sustainable sourcing
//! - Metrics: emissions, Scope 3 breakdown, water and waste charts
//! - Risks: physical and transition risks, climate opportunities
//!
//! # Example
//!
//! ```
//! use esg_common::Dataset;
//! use esg_report::{ReportConfig, ReportGenerator, ReportTheme};
//!
//! let config = ReportConfig::default().with_theme(ReportTheme::Dark);
//! let generator = ReportGenerator::new(config);
//! let html = generator.generate(&Dataset::builtin()).unwrap();
//! assert!(html.starts_with("<!DOCTYPE html>"));
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod sections;
pub mod theme;

pub use config::{CdnConfig, CdnLibrary, ReportConfig, ReportSections, ReportTheme};
pub use error::{ReportError, Result};
pub use generator::{ReportData, ReportGenerator};
pub use theme::{ChartPalette, PaletteSet, ViewState};
