use serde::{Deserialize, Serialize};

use costs_core::DEFAULT_MONTHLY_BUDGET;

/// Window sizes and fallbacks used when assembling the dashboard.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardDefaults {
    pub trend_days: u32,
    pub breakdown_days: u32,
    pub recent_limit: u32,
    pub default_budget: f64,
}

impl Default for DashboardDefaults {
    fn default() -> Self {
        Self {
            trend_days: 7,
            breakdown_days: 30,
            recent_limit: 10,
            default_budget: DEFAULT_MONTHLY_BUDGET,
        }
    }
}
