//! Dataset keys and series keys shared by the composer and validation.

// Dataset array keys (JSON names).
pub const GHG_EMISSIONS: &str = "ghgEmissions";
pub const SCOPE3_BREAKDOWN: &str = "scope3Breakdown";
pub const WATER_USAGE: &str = "waterUsage";
pub const WATER_TREND: &str = "waterTrend";
pub const WASTE_TREND: &str = "wasteTrend";
pub const PHYSICAL_RISKS: &str = "physicalRisks";
pub const TRANSITION_RISKS: &str = "transitionRisks";
pub const CLIMATE_OPPORTUNITIES: &str = "climateOpportunities";

// Series keys inside time-series points.
pub const SCOPE_1: &str = "Scope 1";
pub const SCOPE_2: &str = "Scope 2";
pub const SCOPE_3: &str = "Scope 3";
pub const WITHDRAWAL: &str = "Withdrawal";
pub const DISCHARGE: &str = "Discharge";
pub const RECYCLED: &str = "Recycled";
pub const LANDFILL: &str = "Landfill";
