//! Headline KPI cards.
//!
//! Cards whose value follows from a dataset series are derived from it so
//! the headline cannot drift from the charts. The rest come from literal
//! records in [`Dataset::headlines`].

use crate::dataset::{Dataset, TimeSeriesPoint};
use crate::format::{format_change_pct, format_number, format_signed};
use crate::series::{LANDFILL, RECYCLED};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GHG_TOTAL: &str = "ghg_total";
pub const WATER_USAGE: &str = "water_usage";
pub const WASTE_RECYCLED: &str = "waste_recycled";
pub const SUSTAINABLE_SOURCING: &str = "sustainable_sourcing";

/// Card order at the top of the page.
pub const CARD_ORDER: [&str; 4] = [GHG_TOTAL, WATER_USAGE, WASTE_RECYCLED, SUSTAINABLE_SOURCING];

/// Color of the note under a headline value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeadlineTone {
    #[default]
    Neutral,
    Positive,
    Negative,
}

/// Card icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    Activity,
    Droplets,
    Recycle,
    Leaf,
    Cloud,
    Scale,
}

/// A single KPI card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HeadlineMetric {
    /// Stable identifier (`ghg_total`, `water_usage`, ...).
    pub id: String,
    pub title: String,
    pub value: f64,
    /// Unit shown after the value. `%` is rendered inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Comparison or target note under the value.
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub tone: HeadlineTone,
    #[serde(default)]
    pub icon: Icon,
}

impl HeadlineMetric {
    /// Value with thousands separators, with an inline `%` when applicable.
    pub fn display_value(&self) -> String {
        let number = format_number(self.value);
        match self.unit.as_deref() {
            Some("%") => format!("{number}%"),
            _ => number,
        }
    }

    /// Unit shown next to the value, if it is not inline.
    pub fn display_unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|u| *u != "%" && !u.is_empty())
    }
}

/// Total GHG emissions card, from the last two `ghgEmissions` points.
pub fn derived_ghg_total(dataset: &Dataset) -> Option<HeadlineMetric> {
    let latest = dataset.ghg_emissions.last()?;
    let total = latest.total();
    let previous = dataset
        .ghg_emissions
        .iter()
        .rev()
        .nth(1)
        .map(TimeSeriesPoint::total)
        .filter(|t| *t > 0.0);

    let (note, tone) = match previous {
        Some(prev) => {
            let change = (total - prev) / prev * 100.0;
            let tone = if change < 0.0 {
                HeadlineTone::Positive
            } else {
                HeadlineTone::Neutral
            };
            (format!("{} from last year", format_change_pct(change)), tone)
        }
        None => (format!("Reporting year {}", latest.name), HeadlineTone::Neutral),
    };

    Some(HeadlineMetric {
        id: GHG_TOTAL.to_string(),
        title: "Total GHG Emissions".to_string(),
        value: total,
        unit: Some("tCO2e".to_string()),
        note,
        tone,
        icon: Icon::Activity,
    })
}

/// Share of waste recycled in a point, in percent.
///
/// `None` when either series is missing or the point has no waste.
pub fn recycled_share(point: &TimeSeriesPoint) -> Option<f64> {
    let recycled = point.value(RECYCLED)?;
    let landfill = point.value(LANDFILL)?;
    let total = recycled + landfill;
    (total > 0.0).then(|| recycled / total * 100.0)
}

/// Waste recycled card, from the last two `wasteTrend` points.
pub fn derived_waste_recycled(dataset: &Dataset) -> Option<HeadlineMetric> {
    let latest = dataset.waste_trend.last()?;
    let share = recycled_share(latest)?.round();
    let previous = dataset
        .waste_trend
        .iter()
        .rev()
        .nth(1)
        .and_then(recycled_share)
        .map(f64::round);

    let (note, tone) = match previous {
        Some(prev) => {
            let delta = share - prev;
            let tone = if delta > 0.0 {
                HeadlineTone::Positive
            } else if delta < 0.0 {
                HeadlineTone::Negative
            } else {
                HeadlineTone::Neutral
            };
            (format!("{} pts from last year", format_signed(delta)), tone)
        }
        None => (format!("Reporting year {}", latest.name), HeadlineTone::Neutral),
    };

    Some(HeadlineMetric {
        id: WASTE_RECYCLED.to_string(),
        title: "Waste Recycled".to_string(),
        value: share,
        unit: Some("%".to_string()),
        note,
        tone,
        icon: Icon::Recycle,
    })
}

/// Build the headline cards for a dataset.
///
/// Derived cards fall back to a literal record with the same id when their
/// series is empty. Literal records with unknown ids are appended in input
/// order. A card with neither source is omitted.
pub fn derive_headlines(dataset: &Dataset) -> Vec<HeadlineMetric> {
    let literal = |id: &str| dataset.headlines.iter().find(|h| h.id == id).cloned();

    let mut cards = Vec::with_capacity(CARD_ORDER.len());
    for id in CARD_ORDER {
        let card = match id {
            GHG_TOTAL => derived_ghg_total(dataset).or_else(|| literal(id)),
            WASTE_RECYCLED => derived_waste_recycled(dataset).or_else(|| literal(id)),
            _ => literal(id),
        };
        match card {
            Some(card) => cards.push(card),
            None => debug!(id, "No data for headline card"),
        }
    }

    cards.extend(
        dataset
            .headlines
            .iter()
            .filter(|h| !CARD_ORDER.contains(&h.id.as_str()))
            .cloned(),
    );
    cards
}
