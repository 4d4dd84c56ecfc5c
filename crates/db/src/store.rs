use std::path::PathBuf;

use costs_core::{NewSession, Session, Settings, SettingsUpdate};

use crate::Db;
use crate::error::Result;
use crate::types::SessionFilter;

/// Tabular store behind the aggregation layer: filtered select, insert and
/// update-by-id over the session log and the settings singleton.
pub trait SessionStore: Send + Sync {
    fn select_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>>;

    /// Inserts one row and returns it with the store-assigned id and timestamp.
    fn insert_session(&self, session: &NewSession) -> Result<Session>;

    /// Fails unless exactly one settings row exists.
    fn settings(&self) -> Result<Settings>;

    fn update_settings(&self, id: &str, update: &SettingsUpdate) -> Result<Settings>;
}

/// SQLite-backed store. Every call opens its own connection so concurrent
/// readers never share one.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(&self) -> Result<Db> {
        Db::open(&self.path)
    }

    pub fn migrate(&self) -> Result<()> {
        self.open()?.migrate()
    }
}

impl SessionStore for SqliteStore {
    fn select_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        self.open()?.select_sessions(filter)
    }

    fn insert_session(&self, session: &NewSession) -> Result<Session> {
        self.open()?.insert_session(session)
    }

    fn settings(&self) -> Result<Settings> {
        self.open()?.settings()
    }

    fn update_settings(&self, id: &str, update: &SettingsUpdate) -> Result<Settings> {
        self.open()?.update_settings(id, update)
    }
}
