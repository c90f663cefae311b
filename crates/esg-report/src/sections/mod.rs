//! Report section data structures.

pub mod headlines;
pub mod metrics;
pub mod risks;

pub use headlines::HeadlinesSection;
pub use metrics::{ChartSpec, MetricsSection, PieSlice, SeriesSpec};
pub use risks::{NarrativeField, NarrativeItem, NarrativeList, RisksSection};
