use costs_core::{Settings, SettingsUpdate};
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::{SETTINGS_COLUMNS, row_to_settings};

impl Db {
    /// Single-row-or-error fetch of the settings singleton.
    pub fn settings(&self) -> Result<Settings> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SETTINGS_COLUMNS} FROM costs_settings"))?;
        let rows = stmt.query_map([], row_to_settings)?;
        let mut rows = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        match rows.len() {
            0 => Err(DbError::SettingsMissing),
            1 => Ok(rows.remove(0)),
            count => Err(DbError::SettingsNotSingleton(count)),
        }
    }

    pub fn update_settings(&self, id: &str, update: &SettingsUpdate) -> Result<Settings> {
        self.conn
            .query_row(
                &format!(
                    r#"
                    UPDATE costs_settings
                    SET monthly_budget = ?1, updated_at = ?2
                    WHERE id = ?3
                    RETURNING {SETTINGS_COLUMNS}
                    "#
                ),
                params![update.monthly_budget, update.updated_at, id],
                row_to_settings,
            )
            .optional()?
            .ok_or_else(|| DbError::NotFound(format!("settings {id}")))
    }

    /// Adds a settings row. Only used to provision or repair the singleton.
    pub fn insert_settings(&self, settings: &Settings) -> Result<()> {
        self.conn.execute(
            &format!("INSERT INTO costs_settings ({SETTINGS_COLUMNS}) VALUES (?1, ?2, ?3, ?4)"),
            params![
                settings.id,
                settings.monthly_budget,
                settings.created_at,
                settings.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn delete_settings(&self) -> Result<usize> {
        Ok(self.conn.execute("DELETE FROM costs_settings", [])?)
    }
}
