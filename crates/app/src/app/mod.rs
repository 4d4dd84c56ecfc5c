use std::path::PathBuf;
use std::sync::Arc;

use costs_db::SqliteStore;

use crate::config::DashboardDefaults;
use crate::error::{AppError, Result};
use crate::services::{AppServices, SharedClock, SharedStore};
use crate::util::time::SystemClock;

/// Settings needed to run the dashboard against a local database.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub dashboard: DashboardDefaults,
}

impl AppConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            dashboard: DashboardDefaults::default(),
        }
    }
}

/// Application state shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store: SharedStore = Arc::new(SqliteStore::new(config.db_path.clone()));
        Self::with_store(config, store, Arc::new(SystemClock))
    }

    /// Builds the state over an arbitrary store and clock.
    pub fn with_store(config: AppConfig, store: SharedStore, clock: SharedClock) -> Self {
        let services = AppServices::new(store, clock, config.dashboard.clone());
        Self { config, services }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        SqliteStore::new(self.config.db_path.clone())
            .migrate()
            .map_err(|err| AppError::Message(format!("initialize db: {}", err)))
    }
}
