//! Customer analytics configuration.

use serde::{Deserialize, Serialize};

/// Settings for the customer dashboard aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Amount credited as saved for every completed inspection.
    #[serde(default = "default_cost_saved")]
    pub cost_saved_per_inspection: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            cost_saved_per_inspection: default_cost_saved(),
        }
    }
}

fn default_cost_saved() -> i64 {
    500
}
