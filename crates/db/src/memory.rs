use std::sync::{Mutex, MutexGuard};

use costs_core::{NewSession, Session, Settings, SettingsUpdate};
use uuid::Uuid;

use crate::error::{DbError, Result};
use crate::helpers::{now_timestamp, stored_tokens};
use crate::store::SessionStore;
use crate::types::{SessionFilter, SessionOrder};

#[derive(Default)]
struct MemoryState {
    sessions: Vec<Session>,
    settings: Vec<Settings>,
    failure: Option<String>,
}

/// In-process store with the same contract as [`crate::SqliteStore`].
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store provisioned with a settings singleton.
    pub fn with_budget(monthly_budget: f64) -> Self {
        let store = Self::new();
        let now = now_timestamp();
        store.push_settings(Settings {
            id: Uuid::new_v4().to_string(),
            monthly_budget,
            created_at: now.clone(),
            updated_at: now,
        });
        store
    }

    pub fn push_settings(&self, settings: Settings) {
        if let Ok(mut state) = self.state.lock() {
            state.settings.push(settings);
        }
    }

    /// While set, every call fails with [`DbError::Unavailable`].
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut state) = self.state.lock() {
            state.failure = message.map(str::to_string);
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        let state = self
            .state
            .lock()
            .map_err(|_| DbError::Unavailable("memory store lock poisoned".to_string()))?;
        if let Some(message) = &state.failure {
            return Err(DbError::Unavailable(message.clone()));
        }
        Ok(state)
    }
}

impl SessionStore for MemoryStore {
    fn select_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let state = self.state()?;
        let mut rows: Vec<Session> = state
            .sessions
            .iter()
            .filter(|session| filter.matches(session))
            .cloned()
            .collect();
        match filter.order {
            SessionOrder::Insertion => {}
            SessionOrder::DateAsc => rows.sort_by_key(|session| session.date),
            SessionOrder::CreatedAtDesc => {
                rows.reverse();
                rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }
        if let Some(limit) = filter.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    fn insert_session(&self, session: &NewSession) -> Result<Session> {
        let mut state = self.state()?;
        let stored = Session {
            id: Uuid::new_v4().to_string(),
            created_at: now_timestamp(),
            date: session.date,
            model: session.model.clone(),
            tokens_in: stored_tokens(session.tokens_in).unsigned_abs(),
            tokens_out: stored_tokens(session.tokens_out).unsigned_abs(),
            cost_usd: session.cost_usd,
            label: session.label.clone(),
            session_id: session.session_id.clone(),
        };
        state.sessions.push(stored.clone());
        Ok(stored)
    }

    fn settings(&self) -> Result<Settings> {
        let state = self.state()?;
        match state.settings.as_slice() {
            [] => Err(DbError::SettingsMissing),
            [settings] => Ok(settings.clone()),
            rows => Err(DbError::SettingsNotSingleton(rows.len())),
        }
    }

    fn update_settings(&self, id: &str, update: &SettingsUpdate) -> Result<Settings> {
        let mut state = self.state()?;
        let settings = state
            .settings
            .iter_mut()
            .find(|settings| settings.id == id)
            .ok_or_else(|| DbError::NotFound(format!("settings {id}")))?;
        settings.monthly_budget = update.monthly_budget;
        settings.updated_at = update.updated_at.clone();
        Ok(settings.clone())
    }
}
