//! Dataset contract validation.
//!
//! The composer renders whatever it is given: a missing series value becomes
//! a gap and a missing array becomes an empty chart. These checks make that
//! silent degradation visible before a page is published.

use esg_common::binding::{ChartBinding, ChartKind, CHART_BINDINGS};
use esg_common::headline::{derived_ghg_total, derived_waste_recycled, GHG_TOTAL, WASTE_RECYCLED};
use esg_common::series::{self, SCOPE_3};
use esg_common::{CategoryShare, Dataset, HeadlineMetric, SkipScope, TimeSeriesPoint};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Relative tolerance for share totals (0.5 %).
pub const SHARE_TOLERANCE: f64 = 0.005;

/// Tolerance when comparing literal headline values to derived ones.
const HEADLINE_TOLERANCE: f64 = 0.5;

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

fn hex_color() -> &'static Regex {
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern is valid")
    })
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Renders, but the page is likely not what the author intended.
    Warning,
    /// Renders with missing or contradictory figures.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single finding, located by a JSON path into the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Location such as `wasteTrend[0].Landfill`.
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.path, self.message)
    }
}

/// All findings for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// One-line summary, e.g. `2 errors, 1 warning`.
    pub fn summary(&self) -> String {
        let errors = self.errors().count();
        let warnings = self.warnings().count();
        format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" }
        )
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}

/// Validate a dataset against the chart bindings and its own aggregates.
///
/// The dataset is only read.
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_skipped(dataset, &mut report);

    for binding in CHART_BINDINGS {
        match binding.kind {
            ChartKind::Pie => {
                let shares = dataset.shares(binding.dataset_key).unwrap_or(&[]);
                check_shares(binding, shares, &mut report);
            }
            ChartKind::Bar | ChartKind::Line => {
                let points = dataset.series(binding.dataset_key).unwrap_or(&[]);
                check_series_coverage(binding, points, &mut report);
            }
        }
    }

    check_scope3_total(dataset, &mut report);
    check_water_usage_total(dataset, &mut report);
    check_narratives(dataset, &mut report);
    check_headlines(dataset, &mut report);

    for issue in &report.issues {
        match issue.severity {
            Severity::Error => warn!(path = %issue.path, "{}", issue.message),
            Severity::Warning => debug!(path = %issue.path, "{}", issue.message),
        }
    }

    report
}

fn check_skipped(dataset: &Dataset, report: &mut ValidationReport) {
    for item in &dataset.skipped {
        let issue = match item.scope {
            SkipScope::Value => ValidationIssue::warning(&item.path, format!("ignored: {}", item.reason)),
            SkipScope::Record => {
                ValidationIssue::error(&item.path, format!("entry dropped: {}", item.reason))
            }
            SkipScope::Array => ValidationIssue::error(
                &item.path,
                format!("array dropped: {}; its chart will be empty", item.reason),
            ),
        };
        report.push(issue);
    }
}

fn check_series_coverage(binding: &ChartBinding, points: &[TimeSeriesPoint], report: &mut ValidationReport) {
    let key = binding.dataset_key;
    if points.is_empty() {
        report.push(ValidationIssue::warning(
            key,
            format!("no data; chart \"{}\" will be empty", binding.title),
        ));
        return;
    }

    for (i, point) in points.iter().enumerate() {
        for series_key in binding.series_keys() {
            if point.value(series_key).is_none() {
                report.push(ValidationIssue::error(
                    format!("{key}[{i}].{series_key}"),
                    format!(
                        "missing value for series \"{series_key}\" in \"{}\"; chart \"{}\" will show a gap",
                        point.name, binding.title
                    ),
                ));
            }
        }
        for extra in point.values.keys() {
            if !binding.series_keys().any(|k| k == extra) {
                report.push(ValidationIssue::warning(
                    format!("{key}[{i}].{extra}"),
                    format!("key \"{extra}\" is not plotted by chart \"{}\"", binding.title),
                ));
            }
        }
    }
}

fn check_shares(binding: &ChartBinding, shares: &[CategoryShare], report: &mut ValidationReport) {
    let key = binding.dataset_key;
    if shares.is_empty() {
        report.push(ValidationIssue::warning(
            key,
            format!("no data; chart \"{}\" will be empty", binding.title),
        ));
        return;
    }

    for (i, share) in shares.iter().enumerate() {
        if !hex_color().is_match(&share.color) {
            report.push(ValidationIssue::error(
                format!("{key}[{i}].color"),
                format!("\"{}\" is not a #rgb or #rrggbb color", share.color),
            ));
        }
        if share.value < 0.0 {
            report.push(ValidationIssue::error(
                format!("{key}[{i}].value"),
                format!("negative share {}", share.value),
            ));
        }
    }
}

fn within_tolerance(actual: f64, expected: f64) -> bool {
    if expected == 0.0 {
        return actual == 0.0;
    }
    ((actual - expected) / expected).abs() <= SHARE_TOLERANCE
}

fn check_scope3_total(dataset: &Dataset, report: &mut ValidationReport) {
    if dataset.scope3_breakdown.is_empty() {
        return;
    }
    let Some(latest) = dataset.ghg_emissions.last() else {
        return;
    };
    let Some(scope3) = latest.value(SCOPE_3) else {
        // Reported as a coverage error already.
        return;
    };

    let sum: f64 = dataset.scope3_breakdown.iter().map(|s| s.value).sum();
    if !within_tolerance(sum, scope3) {
        report.push(ValidationIssue::error(
            series::SCOPE3_BREAKDOWN,
            format!(
                "categories sum to {sum} but {} Scope 3 emissions are {scope3}",
                latest.name
            ),
        ));
    }
}

fn check_water_usage_total(dataset: &Dataset, report: &mut ValidationReport) {
    if dataset.water_usage.is_empty() {
        return;
    }
    let sum: f64 = dataset.water_usage.iter().map(|s| s.value).sum();
    if !within_tolerance(sum, 100.0) {
        report.push(ValidationIssue::error(
            series::WATER_USAGE,
            format!("shares sum to {sum}%, expected 100%"),
        ));
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_narratives(dataset: &Dataset, report: &mut ValidationReport) {
    for (key, risks) in [
        (series::PHYSICAL_RISKS, &dataset.physical_risks),
        (series::TRANSITION_RISKS, &dataset.transition_risks),
    ] {
        for (i, risk) in risks.iter().enumerate() {
            if risk.name.trim().is_empty() {
                report.push(ValidationIssue::warning(format!("{key}[{i}].name"), "empty name"));
            }
            if is_blank(risk.impact.as_deref()) {
                report.push(ValidationIssue::warning(
                    format!("{key}[{i}].impact"),
                    "missing impact; rendered as \"Not provided\"",
                ));
            }
            if is_blank(risk.mitigation.as_deref()) {
                report.push(ValidationIssue::warning(
                    format!("{key}[{i}].mitigation"),
                    "missing mitigation; rendered as \"Not provided\"",
                ));
            }
        }
    }

    let key = series::CLIMATE_OPPORTUNITIES;
    for (i, opportunity) in dataset.climate_opportunities.iter().enumerate() {
        if opportunity.name.trim().is_empty() {
            report.push(ValidationIssue::warning(format!("{key}[{i}].name"), "empty name"));
        }
        if is_blank(opportunity.description.as_deref()) {
            report.push(ValidationIssue::warning(
                format!("{key}[{i}].description"),
                "missing description; rendered as \"Not provided\"",
            ));
        }
        if is_blank(opportunity.benefit.as_deref()) {
            report.push(ValidationIssue::warning(
                format!("{key}[{i}].benefit"),
                "missing benefit; rendered as \"Not provided\"",
            ));
        }
    }
}

fn check_headlines(dataset: &Dataset, report: &mut ValidationReport) {
    let derived: [(&str, Option<HeadlineMetric>); 2] = [
        (GHG_TOTAL, derived_ghg_total(dataset)),
        (WASTE_RECYCLED, derived_waste_recycled(dataset)),
    ];

    for (i, literal) in dataset.headlines.iter().enumerate() {
        if dataset.headlines[..i].iter().any(|h| h.id == literal.id) {
            report.push(ValidationIssue::warning(
                format!("headlines[{i}].id"),
                format!("duplicate headline \"{}\" is ignored", literal.id),
            ));
            continue;
        }

        let Some((_, Some(computed))) = derived.iter().find(|(id, _)| *id == literal.id) else {
            continue;
        };
        if (literal.value - computed.value).abs() > HEADLINE_TOLERANCE {
            report.push(ValidationIssue::warning(
                format!("headlines[{i}].value"),
                format!(
                    "literal value {} disagrees with {} derived from the series; the derived value is shown",
                    literal.value, computed.value
                ),
            ));
        }
    }
}
