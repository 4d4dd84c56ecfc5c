#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use costs_core::{NewSession, parse_date};
use costs_db::{Db, SessionStore};
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn date(value: &str) -> NaiveDate {
    parse_date(value).expect("date")
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

pub fn insert_sessions(store: &dyn SessionStore, sessions: Vec<NewSession>) {
    for session in sessions {
        store.insert_session(&session).expect("insert session");
    }
}
