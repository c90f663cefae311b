//! Headline cards section data.

use esg_common::{derive_headlines, Dataset, HeadlineMetric, HeadlineTone};
use serde::Serialize;

/// Headline KPI cards shown above the charts.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlinesSection {
    pub cards: Vec<HeadlineMetric>,
}

impl HeadlinesSection {
    /// Build the cards for a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            cards: derive_headlines(dataset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// CSS class for a headline note.
pub fn tone_class(tone: HeadlineTone) -> &'static str {
    match tone {
        HeadlineTone::Neutral => "muted",
        HeadlineTone::Positive => "tone-positive",
        HeadlineTone::Negative => "tone-negative",
    }
}
