pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::DashboardDefaults;
pub use error::{ApiError, AppError, Result};
pub use services::{
    AnalyticsService, AppServices, Dashboard, DashboardService, DashboardState, SessionsService,
    SettingsService, SharedClock, SharedStore,
};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{Clock, FixedClock, SystemClock, timestamp};
