//! Dataset model.
//!
//! The dataset is a fixed set of named arrays, created once and never
//! mutated by consumers. Its JSON form uses camelCase array names and flat
//! time-series points:
//!
//! ```json
//! { "ghgEmissions": [ { "name": "2022", "Scope 1": 220, "Scope 2": 150 } ] }
//! ```
//!
//! Reading is lenient. A `null` array reads as empty, an entry of the wrong
//! shape is skipped, and a non-numeric series value reads as a gap. Everything
//! skipped is listed in [`Dataset::skipped`] so validation can report it.

use crate::error::{Error, Result};
use crate::headline::{HeadlineMetric, HeadlineTone, Icon};
use crate::series;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// One period of a multi-series chart.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TimeSeriesPoint {
    /// Period label (for example a reporting year). Numbers are accepted and
    /// read as their decimal text.
    pub name: String,
    /// One value per series key.
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
    /// Fields that were present but unreadable: `(field, reason)`.
    #[serde(skip)]
    ignored: Vec<(Option<String>, String)>,
}

impl TimeSeriesPoint {
    /// Create a point from `(series key, value)` pairs.
    pub fn new<'a>(name: impl Into<String>, values: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            ignored: Vec::new(),
        }
    }

    /// Value for a series key; `None` when the point does not supply it.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Sum of all series values in this point.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    fn from_value(value: Value) -> Self {
        let mut point = Self {
            name: String::new(),
            values: BTreeMap::new(),
            ignored: Vec::new(),
        };
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                point
                    .ignored
                    .push((None, format!("expected an object, found {}", lenient::kind(&other))));
                return point;
            }
        };

        for (field, value) in fields {
            if field == "name" {
                match value {
                    Value::String(label) => point.name = label,
                    Value::Number(n) => point.name = n.to_string(),
                    other => point.ignored.push((
                        Some(field),
                        format!("period label must be a string or number, found {}", lenient::kind(&other)),
                    )),
                }
                continue;
            }
            match value {
                // Explicit gap.
                Value::Null => {}
                Value::Number(n) => match n.as_f64() {
                    Some(v) => {
                        point.values.insert(field, v);
                    }
                    None => point.ignored.push((Some(field), "number out of range".to_string())),
                },
                other => point.ignored.push((
                    Some(field),
                    format!("expected a number, found {}", lenient::kind(&other)),
                )),
            }
        }
        point
    }
}

impl<'de> Deserialize<'de> for TimeSeriesPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// How much input a skipped item covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipScope {
    /// A single field; the rest of the entry was kept.
    Value,
    /// A whole array entry.
    Record,
    /// A whole array.
    Array,
}

/// Input that was present in the dataset file but could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInput {
    pub scope: SkipScope,
    /// Location such as `ghgEmissions[0].Scope 1`.
    pub path: String,
    pub reason: String,
}

/// A slice of a pie/donut chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
    /// Display color as a hex string.
    pub color: String,
}

impl CategoryShare {
    pub fn new(name: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            color: color.into(),
        }
    }
}

/// A physical or transition climate risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Mitigation narrative. Older datasets call this field `strategy`.
    #[serde(default, alias = "strategy", skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

impl RiskRecord {
    pub fn new(name: &str, impact: &str, mitigation: &str) -> Self {
        Self {
            name: name.to_string(),
            impact: Some(impact.to_string()),
            mitigation: Some(mitigation.to_string()),
        }
    }
}

/// A climate-related opportunity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OpportunityRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,
}

impl OpportunityRecord {
    pub fn new(name: &str, description: &str, benefit: &str) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            benefit: Some(benefit.to_string()),
        }
    }
}

/// The complete dashboard dataset.
///
/// Every array defaults to empty when absent or malformed, so a partial
/// dataset loads and renders empty visuals instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Literal headline cards (values that cannot be derived from the series).
    #[serde(default)]
    pub headlines: Vec<HeadlineMetric>,
    /// Emissions per reporting year, one series per scope (tCO2e).
    #[serde(default)]
    pub ghg_emissions: Vec<TimeSeriesPoint>,
    /// Scope 3 categories for the latest reporting year (tCO2e).
    #[serde(default)]
    pub scope3_breakdown: Vec<CategoryShare>,
    /// Water withdrawal by source (percent of total).
    #[serde(default)]
    pub water_usage: Vec<CategoryShare>,
    /// Water withdrawal and discharge per year.
    #[serde(default)]
    pub water_trend: Vec<TimeSeriesPoint>,
    /// Waste disposition per year (tonnes).
    #[serde(default)]
    pub waste_trend: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub physical_risks: Vec<RiskRecord>,
    #[serde(default)]
    pub transition_risks: Vec<RiskRecord>,
    #[serde(default)]
    pub climate_opportunities: Vec<OpportunityRecord>,
    /// Input dropped while reading the file. Empty for built datasets.
    #[serde(skip)]
    pub skipped: Vec<SkippedInput>,
}

/// On-disk shape, read field by field.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawDataset {
    headlines: lenient::Entries<HeadlineMetric>,
    ghg_emissions: lenient::Entries<TimeSeriesPoint>,
    scope3_breakdown: lenient::Entries<CategoryShare>,
    water_usage: lenient::Entries<CategoryShare>,
    water_trend: lenient::Entries<TimeSeriesPoint>,
    waste_trend: lenient::Entries<TimeSeriesPoint>,
    physical_risks: lenient::Entries<RiskRecord>,
    transition_risks: lenient::Entries<RiskRecord>,
    climate_opportunities: lenient::Entries<OpportunityRecord>,
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        let mut skipped = Vec::new();
        let mut points = |key: &str, entries: lenient::Entries<TimeSeriesPoint>| {
            let mut points = entries.take(key, &mut skipped);
            for (i, point) in points.iter_mut().enumerate() {
                for (field, reason) in point.ignored.drain(..) {
                    let (scope, path) = match field {
                        Some(field) => (SkipScope::Value, format!("{key}[{i}].{field}")),
                        None => (SkipScope::Record, format!("{key}[{i}]")),
                    };
                    skipped.push(SkippedInput { scope, path, reason });
                }
            }
            points
        };
        let ghg_emissions = points(series::GHG_EMISSIONS, raw.ghg_emissions);
        let water_trend = points(series::WATER_TREND, raw.water_trend);
        let waste_trend = points(series::WASTE_TREND, raw.waste_trend);

        let dataset = Self {
            headlines: raw.headlines.take("headlines", &mut skipped),
            ghg_emissions,
            scope3_breakdown: raw.scope3_breakdown.take(series::SCOPE3_BREAKDOWN, &mut skipped),
            water_usage: raw.water_usage.take(series::WATER_USAGE, &mut skipped),
            water_trend,
            waste_trend,
            physical_risks: raw.physical_risks.take(series::PHYSICAL_RISKS, &mut skipped),
            transition_risks: raw.transition_risks.take(series::TRANSITION_RISKS, &mut skipped),
            climate_opportunities: raw
                .climate_opportunities
                .take(series::CLIMATE_OPPORTUNITIES, &mut skipped),
            skipped,
        };
        for item in &dataset.skipped {
            warn!(path = %item.path, "Skipped dataset input: {}", item.reason);
        }
        dataset
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawDataset::deserialize(deserializer).map(Self::from)
    }
}

// Lenient array reading
mod lenient {
    use super::{SkipScope, SkippedInput};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// An array field: the entries that parsed and the ones that did not.
    pub(super) struct Entries<T> {
        items: Vec<T>,
        rejected: Vec<(SkipScope, Option<usize>, String)>,
    }

    impl<T> Default for Entries<T> {
        fn default() -> Self {
            Self {
                items: Vec::new(),
                rejected: Vec::new(),
            }
        }
    }

    impl<T> Entries<T> {
        /// Parsed entries; rejections are appended to `skipped` under `key`.
        pub(super) fn take(self, key: &str, skipped: &mut Vec<SkippedInput>) -> Vec<T> {
            skipped.extend(self.rejected.into_iter().map(|(scope, index, reason)| SkippedInput {
                scope,
                path: match index {
                    Some(i) => format!("{key}[{i}]"),
                    None => key.to_string(),
                },
                reason,
            }));
            self.items
        }
    }

    impl<'de, T: DeserializeOwned> Deserialize<'de> for Entries<T> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let mut entries = Self::default();
            match Value::deserialize(deserializer)? {
                // Same as an absent array.
                Value::Null => {}
                Value::Array(values) => {
                    for (i, value) in values.into_iter().enumerate() {
                        match serde_json::from_value(value) {
                            Ok(item) => entries.items.push(item),
                            Err(err) => entries.rejected.push((SkipScope::Record, Some(i), err.to_string())),
                        }
                    }
                }
                other => entries.rejected.push((
                    SkipScope::Array,
                    None,
                    format!("expected an array, found {}", kind(&other)),
                )),
            }
            Ok(entries)
        }
    }

    pub(super) fn kind(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }
}

impl Dataset {
    /// The built-in mock dataset: a Sri Lankan apparel manufacturer,
    /// reporting years 2022 to 2024.
    pub fn builtin() -> Self {
        use crate::series::*;

        Self {
            headlines: vec![
                HeadlineMetric {
                    id: crate::headline::WATER_USAGE.to_string(),
                    title: "Water Usage".to_string(),
                    value: 10_800.0,
                    unit: Some("m³".to_string()),
                    note: "-6.1% from last year".to_string(),
                    tone: HeadlineTone::Positive,
                    icon: Icon::Droplets,
                },
                HeadlineMetric {
                    id: crate::headline::SUSTAINABLE_SOURCING.to_string(),
                    title: "Sustainable Sourcing".to_string(),
                    value: 50.0,
                    unit: Some("%".to_string()),
                    note: "Target: 65% by 2026".to_string(),
                    tone: HeadlineTone::Neutral,
                    icon: Icon::Leaf,
                },
            ],
            ghg_emissions: vec![
                TimeSeriesPoint::new("2022", [(SCOPE_1, 220.0), (SCOPE_2, 150.0), (SCOPE_3, 2800.0)]),
                TimeSeriesPoint::new("2023", [(SCOPE_1, 210.0), (SCOPE_2, 145.0), (SCOPE_3, 2950.0)]),
                TimeSeriesPoint::new("2024", [(SCOPE_1, 205.0), (SCOPE_2, 130.0), (SCOPE_3, 3100.0)]),
            ],
            scope3_breakdown: vec![
                CategoryShare::new("Purchased Goods & Services", 1800.0, "#34d399"),
                CategoryShare::new("Upstream Transport", 700.0, "#10b981"),
                CategoryShare::new("Employee Commuting", 600.0, "#059669"),
            ],
            water_usage: vec![
                CategoryShare::new("River Water", 60.0, "#3b82f6"),
                CategoryShare::new("Groundwater", 30.0, "#60a5fa"),
                CategoryShare::new("Municipal Water", 10.0, "#93c5fd"),
            ],
            water_trend: vec![
                TimeSeriesPoint::new("2022", [(WITHDRAWAL, 100.0), (DISCHARGE, 95.0)]),
                TimeSeriesPoint::new("2023", [(WITHDRAWAL, 95.0), (DISCHARGE, 90.0)]),
                TimeSeriesPoint::new("2024", [(WITHDRAWAL, 92.0), (DISCHARGE, 88.0)]),
            ],
            waste_trend: vec![
                TimeSeriesPoint::new("2022", [(RECYCLED, 75.0), (LANDFILL, 25.0)]),
                TimeSeriesPoint::new("2023", [(RECYCLED, 80.0), (LANDFILL, 20.0)]),
                TimeSeriesPoint::new("2024", [(RECYCLED, 82.0), (LANDFILL, 18.0)]),
            ],
            physical_risks: vec![
                RiskRecord::new(
                    "Increased Flooding",
                    "Disruption of supply chains, damage to factory infrastructure.",
                    "Relocate critical equipment, implement flood defenses.",
                ),
                RiskRecord::new(
                    "Water Scarcity",
                    "Operational downtime, increased water costs.",
                    "Invest in water-efficient machinery, implement rainwater harvesting.",
                ),
            ],
            transition_risks: vec![
                RiskRecord::new(
                    "Carbon Tax",
                    "Increased operating costs, reduced profit margins.",
                    "Shift to renewable energy, improve energy efficiency.",
                ),
                RiskRecord::new(
                    "Shifting Consumer Preferences",
                    "Loss of market share.",
                    "Invest in sustainable materials, obtain eco-certifications.",
                ),
            ],
            climate_opportunities: vec![
                OpportunityRecord::new(
                    "Renewable Energy Adoption",
                    "Installing solar panels on factory roofs and shifting to a cleaner energy mix.",
                    "Reduced operating costs, energy independence, enhanced brand image",
                ),
                OpportunityRecord::new(
                    "Circular Economy Initiatives",
                    "Partnering with local startups to turn textile waste into new products or inputs.",
                    "Waste reduction, new revenue streams, strengthening local supply chains",
                ),
            ],
            skipped: Vec::new(),
        }
    }

    /// Parse a dataset from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;
        debug!(path = %path.display(), "Loaded dataset");
        Ok(dataset)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON Schema describing the dataset file format.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Dataset)
    }

    /// Time-series array by its JSON key.
    pub fn series(&self, key: &str) -> Option<&[TimeSeriesPoint]> {
        match key {
            series::GHG_EMISSIONS => Some(&self.ghg_emissions),
            series::WATER_TREND => Some(&self.water_trend),
            series::WASTE_TREND => Some(&self.waste_trend),
            _ => None,
        }
    }

    /// Category-share array by its JSON key.
    pub fn shares(&self, key: &str) -> Option<&[CategoryShare]> {
        match key {
            series::SCOPE3_BREAKDOWN => Some(&self.scope3_breakdown),
            series::WATER_USAGE => Some(&self.water_usage),
            _ => None,
        }
    }

    /// Total emissions across all scopes for the latest reporting period.
    pub fn latest_emissions_total(&self) -> Option<f64> {
        self.ghg_emissions.last().map(TimeSeriesPoint::total)
    }
}
