use chrono::{SecondsFormat, Utc};
use costs_core::{Session, Settings, parse_date};
use rusqlite::Row;
use rusqlite::types::Type;

pub(crate) const SESSION_COLUMNS: &str =
    "id, created_at, date, model, tokens_in, tokens_out, cost_usd, label, session_id";

pub(crate) const SETTINGS_COLUMNS: &str = "id, monthly_budget, created_at, updated_at";

/// Token count as stored; values past the signed 64-bit range saturate.
pub(crate) fn stored_tokens(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn row_to_session(row: &Row<'_>) -> std::result::Result<Session, rusqlite::Error> {
    let date: String = row.get(2)?;
    let date = parse_date(&date)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;
    Ok(Session {
        id: row.get(0)?,
        created_at: row.get(1)?,
        date,
        model: row.get(3)?,
        tokens_in: row.get::<_, i64>(4)?.max(0) as u64,
        tokens_out: row.get::<_, i64>(5)?.max(0) as u64,
        cost_usd: row.get(6)?,
        label: row.get(7)?,
        session_id: row.get(8)?,
    })
}

pub(crate) fn row_to_settings(row: &Row<'_>) -> std::result::Result<Settings, rusqlite::Error> {
    Ok(Settings {
        id: row.get(0)?,
        monthly_budget: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}
