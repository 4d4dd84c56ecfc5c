mod analytics;
mod dashboard;
mod sessions;
mod settings;

use std::sync::Arc;

use costs_db::SessionStore;

use crate::config::DashboardDefaults;
use crate::error::{AppError, Result};
use crate::util::time::Clock;

pub use analytics::{
    AnalyticsService, DEFAULT_BREAKDOWN_DAYS, DEFAULT_RECENT_LIMIT, DEFAULT_TREND_DAYS,
};
pub use dashboard::{Dashboard, DashboardService, DashboardState};
pub use sessions::SessionsService;
pub use settings::SettingsService;

pub type SharedStore = Arc<dyn SessionStore>;
pub type SharedClock = Arc<dyn Clock>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub sessions: SessionsService,
    pub settings: SettingsService,
    pub dashboard: Dashboard,
}

impl AppServices {
    pub fn new(store: SharedStore, clock: SharedClock, defaults: DashboardDefaults) -> Self {
        let analytics = AnalyticsService::new(store.clone(), clock.clone());
        let sessions = SessionsService::new(store.clone());
        let settings = SettingsService::new(store, clock.clone());
        let dashboard = Dashboard::new(
            DashboardService::new(analytics.clone(), settings.clone(), clock, defaults),
            sessions.clone(),
        );
        Self {
            analytics,
            sessions,
            settings,
            dashboard,
        }
    }
}

fn require_positive(value: u32, name: &str) -> Result<u32> {
    if value == 0 {
        return Err(AppError::InvalidInput(format!("{name} must be at least 1")));
    }
    Ok(value)
}
