use costs_core::{NewSession, Session, format_date};
use rusqlite::{params, params_from_iter};
use uuid::Uuid;

use crate::Db;
use crate::error::Result;
use crate::helpers::{SESSION_COLUMNS, now_timestamp, row_to_session, stored_tokens};
use crate::types::{SessionFilter, SessionOrder};

impl Db {
    pub fn select_sessions(&self, filter: &SessionFilter) -> Result<Vec<Session>> {
        let mut sql = format!("SELECT {SESSION_COLUMNS} FROM costs_session");
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        let predicates = [
            ("date = ?", filter.date_eq),
            ("date >= ?", filter.date_gte),
            ("date <= ?", filter.date_lte),
            ("date < ?", filter.date_lt),
        ];
        for (clause, value) in predicates {
            if let Some(date) = value {
                clauses.push(clause);
                values.push(format_date(date));
            }
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(match filter.order {
            SessionOrder::Insertion => " ORDER BY rowid ASC",
            SessionOrder::DateAsc => " ORDER BY date ASC, rowid ASC",
            SessionOrder::CreatedAtDesc => " ORDER BY created_at DESC, rowid DESC",
        });
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), row_to_session)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn insert_session(&self, session: &NewSession) -> Result<Session> {
        let id = Uuid::new_v4().to_string();
        let created_at = now_timestamp();
        let stored = self.conn.query_row(
            &format!(
                r#"
                INSERT INTO costs_session (
                  id, created_at, date, model, tokens_in, tokens_out, cost_usd, label, session_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                RETURNING {SESSION_COLUMNS}
                "#
            ),
            params![
                id,
                created_at,
                format_date(session.date),
                session.model,
                stored_tokens(session.tokens_in),
                stored_tokens(session.tokens_out),
                session.cost_usd,
                session.label,
                session.session_id,
            ],
            row_to_session,
        )?;
        Ok(stored)
    }

    pub fn count_sessions(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM costs_session", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}
