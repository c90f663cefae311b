//! Chart bindings: which dataset array each chart reads, and with which
//! hardcoded series names, colors and stacks.
//!
//! The table is the data-shape contract between the dataset and the
//! composer. Validation checks datasets against it; the report generator
//! renders from it.

use crate::series::*;
use serde::Serialize;

/// Visual used for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// One plotted series of a bar or line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesBinding {
    /// Key read from every time-series point.
    pub key: &'static str,
    pub color: &'static str,
    /// Stack group for stacked bars.
    pub stack: Option<&'static str>,
}

const fn stacked(key: &'static str, color: &'static str) -> SeriesBinding {
    SeriesBinding {
        key,
        color,
        stack: Some("a"),
    }
}

const fn plain(key: &'static str, color: &'static str) -> SeriesBinding {
    SeriesBinding {
        key,
        color,
        stack: None,
    }
}

/// A chart and the dataset array it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartBinding {
    /// DOM id of the chart container.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: ChartKind,
    /// Dataset array key.
    pub dataset_key: &'static str,
    /// Series read from each point. Empty for pie charts, whose slices carry
    /// their own colors.
    pub series: &'static [SeriesBinding],
}

pub const GHG_BY_SCOPE: ChartBinding = ChartBinding {
    id: "ghg-by-scope",
    title: "GHG Emissions by Scope (GRI 305)",
    description: "Breakdown of greenhouse gas emissions (tCO2e) over the last three years.",
    kind: ChartKind::Bar,
    dataset_key: GHG_EMISSIONS,
    series: &[
        stacked(SCOPE_1, "#ef4444"),
        stacked(SCOPE_2, "#f97316"),
        stacked(SCOPE_3, "#22c55e"),
    ],
};

pub const SCOPE3_BREAKDOWN_PIE: ChartBinding = ChartBinding {
    id: "scope3-breakdown",
    title: "Scope 3 Emissions Breakdown",
    description: "Focus on the largest sources of emissions from the value chain.",
    kind: ChartKind::Pie,
    dataset_key: SCOPE3_BREAKDOWN,
    series: &[],
};

pub const WATER_SOURCES_PIE: ChartBinding = ChartBinding {
    id: "water-sources",
    title: "Water Withdrawal by Source (GRI 303)",
    description: "Share of total water withdrawal by source.",
    kind: ChartKind::Pie,
    dataset_key: WATER_USAGE,
    series: &[],
};

pub const WATER_TREND_LINE: ChartBinding = ChartBinding {
    id: "water-trend",
    title: "Water Withdrawal & Discharge (GRI 303)",
    description: "Trend of water consumption and discharge over time.",
    kind: ChartKind::Line,
    dataset_key: WATER_TREND,
    series: &[plain(WITHDRAWAL, "#3b82f6"), plain(DISCHARGE, "#1d4ed8")],
};

pub const WASTE_TREND_BAR: ChartBinding = ChartBinding {
    id: "waste-trend",
    title: "Waste Generation (GRI 306)",
    description: "Total waste generated (in tonnes) and its composition.",
    kind: ChartKind::Bar,
    dataset_key: WASTE_TREND,
    series: &[stacked(RECYCLED, "#10b981"), stacked(LANDFILL, "#ef4444")],
};

/// All charts, in page order.
pub const CHART_BINDINGS: &[ChartBinding] = &[
    GHG_BY_SCOPE,
    SCOPE3_BREAKDOWN_PIE,
    WATER_SOURCES_PIE,
    WATER_TREND_LINE,
    WASTE_TREND_BAR,
];

impl ChartBinding {
    /// Series keys this chart reads from every point.
    pub fn series_keys(&self) -> impl Iterator<Item = &'static str> {
        self.series.iter().map(|s| s.key)
    }
}
