//! Brew record (tasting log) queries.

use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use super::utils::{optional_uuid_column, score_column, timestamp_column, uuid_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{BrewRecord, SensoryProfile},
};

const RECORD_COLUMNS: &str = "id, date, bean_id, bean_name, method_id, grinder_id, setting_used, bean_weight, water_weight, temperature, total_time, aroma, acidity, sweetness, body, aftertaste, balance, overall, notes";
const INSERT_RECORD_SQL: &str = "INSERT OR IGNORE INTO brew_records (id, date, bean_id, bean_name, method_id, grinder_id, setting_used, bean_weight, water_weight, temperature, total_time, aroma, acidity, sweetness, body, aftertaste, balance, overall, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)";

impl super::Database {
    fn build_record_from_row(row: &rusqlite::Row) -> rusqlite::Result<BrewRecord> {
        Ok(BrewRecord {
            id: uuid_column(row, 0)?,
            date: timestamp_column(row, 1)?,
            bean_id: optional_uuid_column(row, 2)?,
            bean_name: row.get(3)?,
            method_id: optional_uuid_column(row, 4)?,
            grinder_id: optional_uuid_column(row, 5)?,
            setting_used: row.get(6)?,
            bean_weight: row.get(7)?,
            water_weight: row.get(8)?,
            temperature: row.get(9)?,
            total_time: row.get(10)?,
            sensory: SensoryProfile {
                aroma: score_column(row, 11)?,
                acidity: score_column(row, 12)?,
                sweetness: score_column(row, 13)?,
                body: score_column(row, 14)?,
                aftertaste: score_column(row, 15)?,
                balance: score_column(row, 16)?,
                overall: score_column(row, 17)?,
            },
            notes: row.get(18)?,
        })
    }

    /// Stores a record unless one with the same ID exists. Returns whether it
    /// was inserted.
    pub fn insert_record(&self, record: &BrewRecord) -> Result<bool> {
        let s = &record.sensory;
        let inserted = self
            .connection
            .execute(
                INSERT_RECORD_SQL,
                params![
                    record.id.to_string(),
                    record.date.to_string(),
                    record.bean_id.map(|id| id.to_string()),
                    record.bean_name,
                    record.method_id.map(|id| id.to_string()),
                    record.grinder_id.map(|id| id.to_string()),
                    record.setting_used,
                    record.bean_weight,
                    record.water_weight,
                    record.temperature,
                    record.total_time,
                    s.aroma,
                    s.acidity,
                    s.sweetness,
                    s.body,
                    s.aftertaste,
                    s.balance,
                    s.overall,
                    record.notes,
                ],
            )
            .db_context("Failed to insert brew record")?;
        Ok(inserted > 0)
    }

    /// Retrieves a record by its ID.
    pub fn get_record(&self, id: Uuid) -> Result<Option<BrewRecord>> {
        self.connection
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM brew_records WHERE id = ?1"),
                params![id.to_string()],
                Self::build_record_from_row,
            )
            .optional()
            .db_context("Failed to query brew record")
    }

    /// Lists records, newest first, optionally capped at `limit`.
    pub fn list_records(&self, limit: Option<usize>) -> Result<Vec<BrewRecord>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM brew_records ORDER BY date DESC LIMIT ?1"
            ))
            .db_context("Failed to prepare query")?;

        // SQLite treats a negative LIMIT as unbounded
        let limit = limit.map_or(-1, |n| i64::try_from(n).unwrap_or(i64::MAX));

        stmt.query_map(params![limit], Self::build_record_from_row)
            .db_context("Failed to query brew records")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch brew records")
    }
}
