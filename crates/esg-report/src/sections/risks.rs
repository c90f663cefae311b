//! Risks and opportunities section data.

use esg_common::{Dataset, Icon, OpportunityRecord, RiskRecord};
use serde::Serialize;

/// Label/value pair on a narrative card. `None` renders as "Not provided".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeField {
    pub label: &'static str,
    pub value: Option<String>,
}

/// A risk or opportunity card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeItem {
    pub name: String,
    pub fields: Vec<NarrativeField>,
}

impl From<&RiskRecord> for NarrativeItem {
    fn from(risk: &RiskRecord) -> Self {
        Self {
            name: risk.name.clone(),
            fields: vec![
                NarrativeField {
                    label: "Impact",
                    value: risk.impact.clone(),
                },
                NarrativeField {
                    label: "Mitigation",
                    value: risk.mitigation.clone(),
                },
            ],
        }
    }
}

impl From<&OpportunityRecord> for NarrativeItem {
    fn from(opportunity: &OpportunityRecord) -> Self {
        Self {
            name: opportunity.name.clone(),
            fields: vec![
                NarrativeField {
                    label: "Description",
                    value: opportunity.description.clone(),
                },
                NarrativeField {
                    label: "Benefit",
                    value: opportunity.benefit.clone(),
                },
            ],
        }
    }
}

/// A titled list of narrative cards.
#[derive(Debug, Clone, Serialize)]
pub struct NarrativeList {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    /// Whether the icon uses the accent (green) color.
    pub accent: bool,
    pub items: Vec<NarrativeItem>,
}

/// The three card lists at the bottom of the page.
#[derive(Debug, Clone, Serialize)]
pub struct RisksSection {
    pub lists: Vec<NarrativeList>,
}

impl RisksSection {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let lists = vec![
            NarrativeList {
                id: "physical-risks",
                title: "Physical Climate Risks",
                description: "Potential impacts on operations and the supply chain from physical climate hazards.",
                icon: Icon::Cloud,
                accent: false,
                items: dataset.physical_risks.iter().map(NarrativeItem::from).collect(),
            },
            NarrativeList {
                id: "transition-risks",
                title: "Transition Climate Risks",
                description: "Risks related to policy, legal, technological, and market shifts.",
                icon: Icon::Scale,
                accent: false,
                items: dataset.transition_risks.iter().map(NarrativeItem::from).collect(),
            },
            NarrativeList {
                id: "climate-opportunities",
                title: "Climate-Related Opportunities",
                description: "Potential financial benefits and value creation from climate-related actions.",
                icon: Icon::Leaf,
                accent: true,
                items: dataset
                    .climate_opportunities
                    .iter()
                    .map(NarrativeItem::from)
                    .collect(),
            },
        ];
        Self { lists }
    }

    /// Total number of cards across all lists.
    pub fn item_count(&self) -> usize {
        self.lists.iter().map(|l| l.items.len()).sum()
    }
}
