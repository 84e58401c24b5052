//! Key/value settings.

use rusqlite::{OptionalExtension, params};

use crate::error::{DatabaseResultExt, Result};

pub(super) const UPSERT_SETTING_SQL: &str = "INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const SELECT_SETTING_SQL: &str = "SELECT value FROM settings WHERE key = ?1";
const DELETE_SETTING_SQL: &str = "DELETE FROM settings WHERE key = ?1";

impl super::Database {
    /// Reads a setting, `None` when it was never written.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SETTING_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query setting")
    }

    /// Writes a setting, replacing any previous value.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_SETTING_SQL, params![key, value])
            .db_context("Failed to store setting")?;
        Ok(())
    }

    /// Removes a setting. Returns whether it existed.
    pub fn clear_setting(&self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_SETTING_SQL, params![key])
            .db_context("Failed to clear setting")?;
        Ok(removed > 0)
    }
}
