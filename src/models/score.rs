use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-factor contributions; each lies in `0..=weight` of its factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub coverage: f64,
    pub diversity: f64,
    pub seasonal_bloom: f64,
    pub maintenance: f64,
    pub adjacency: f64,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> f64 {
        self.coverage + self.diversity + self.seasonal_bloom + self.maintenance + self.adjacency
    }
}

/// Composite layout quality, `total` in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct LayoutScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}
