#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use costs_app::{AppConfig, AppState, FixedClock, SharedStore};
use costs_core::{NewSession, SessionInput, parse_date};
use costs_db::{MemoryStore, SessionStore};

pub const TODAY: &str = "2024-03-15";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("date")
}

pub fn setup_app() -> TestApp {
    setup_app_with(MemoryStore::with_budget(100.0))
}

pub fn setup_app_with(store: MemoryStore) -> TestApp {
    let store = Arc::new(store);
    let shared: SharedStore = store.clone();
    let config = AppConfig::new(PathBuf::from("unused.sqlite"));
    let state = AppState::with_store(config, shared, Arc::new(FixedClock::new(date(TODAY))));
    TestApp { store, state }
}

pub fn make_session(day: &str, model: &str, cost_usd: f64) -> NewSession {
    NewSession {
        date: date(day),
        model: model.to_string(),
        tokens_in: 1_000,
        tokens_out: 250,
        cost_usd,
        label: None,
        session_id: None,
    }
}

pub fn seed(app: &TestApp, sessions: Vec<NewSession>) {
    for session in sessions {
        app.store.insert_session(&session).expect("insert session");
    }
}

pub fn input(day: &str, model: &str, cost: &str) -> SessionInput {
    SessionInput {
        date: date(day),
        model: model.to_string(),
        tokens_in: Some("1200".into()),
        tokens_out: Some(300.0.into()),
        cost_usd: Some(cost.into()),
        label: Some("refactor".to_string()),
        session_id: None,
    }
}
