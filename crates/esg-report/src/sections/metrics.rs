//! Metrics section data: one chart spec per chart binding.

use esg_common::binding::{ChartBinding, ChartKind, CHART_BINDINGS};
use esg_common::{CategoryShare, Dataset, TimeSeriesPoint};
use serde::Serialize;
use tracing::debug;

/// One plotted series. Missing values are `None` and render as gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    pub data: Vec<Option<f64>>,
}

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
    /// Slice label: its integer share of the pie, e.g. `58%`.
    pub label: String,
}

/// Everything the page needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChartKind,
    /// X-axis labels (bar/line).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<SeriesSpec>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<PieSlice>,
}

impl ChartSpec {
    /// Build a bar or line chart from time-series points.
    pub fn from_points(binding: &ChartBinding, points: &[TimeSeriesPoint]) -> Self {
        let categories = points.iter().map(|p| p.name.clone()).collect();
        let series = binding
            .series
            .iter()
            .map(|s| {
                let data = points
                    .iter()
                    .map(|p| {
                        let value = p.value(s.key);
                        if value.is_none() {
                            debug!(chart = binding.id, series = s.key, period = %p.name, "Series value missing");
                        }
                        value
                    })
                    .collect();
                SeriesSpec {
                    name: s.key.to_string(),
                    color: s.color.to_string(),
                    stack: s.stack.map(str::to_string),
                    data,
                }
            })
            .collect();

        Self {
            categories,
            series,
            ..Self::empty(binding)
        }
    }

    /// Build a pie chart from category shares.
    pub fn from_shares(binding: &ChartBinding, shares: &[CategoryShare]) -> Self {
        let total: f64 = shares.iter().map(|s| s.value).sum();
        let slices = shares
            .iter()
            .map(|s| PieSlice {
                name: s.name.clone(),
                value: s.value,
                color: s.color.clone(),
                label: format!("{:.0}%", if total > 0.0 { s.value / total * 100.0 } else { 0.0 }),
            })
            .collect();

        Self {
            slices,
            ..Self::empty(binding)
        }
    }

    fn empty(binding: &ChartBinding) -> Self {
        Self {
            id: binding.id.to_string(),
            title: binding.title.to_string(),
            description: binding.description.to_string(),
            kind: binding.kind,
            categories: Vec::new(),
            series: Vec::new(),
            slices: Vec::new(),
        }
    }

    /// Whether the chart has nothing to draw: no slices, no periods, or no
    /// value in any series.
    pub fn is_empty(&self) -> bool {
        match self.kind {
            ChartKind::Pie => self.slices.is_empty(),
            ChartKind::Bar | ChartKind::Line => {
                self.categories.is_empty()
                    || self.series.iter().all(|s| s.data.iter().all(Option::is_none))
            }
        }
    }
}

/// Metrics section containing all charts in page order.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSection {
    pub charts: Vec<ChartSpec>,
}

impl MetricsSection {
    /// Build every bound chart. An array the dataset lacks yields an empty
    /// chart rather than an error.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let charts = CHART_BINDINGS
            .iter()
            .map(|binding| match binding.kind {
                ChartKind::Pie => {
                    ChartSpec::from_shares(binding, dataset.shares(binding.dataset_key).unwrap_or(&[]))
                }
                ChartKind::Bar | ChartKind::Line => {
                    ChartSpec::from_points(binding, dataset.series(binding.dataset_key).unwrap_or(&[]))
                }
            })
            .collect();
        Self { charts }
    }

    pub fn chart(&self, id: &str) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.id == id)
    }
}
