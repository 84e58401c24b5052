//! Grinder profile queries.

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use super::utils::{range_columns, uuid_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{GrindRanges, GrinderProfile},
    params::{CreateGrinder, UpdateGrinder, validate_setting_bounds},
};

const GRINDER_COLUMNS: &str = "id, name, default_setting, min_setting, max_setting, step, espresso_low, espresso_high, pour_over_low, pour_over_high, french_press_low, french_press_high";
const INSERT_GRINDER_SQL: &str = "INSERT OR IGNORE INTO grinders (id, name, default_setting, min_setting, max_setting, step, espresso_low, espresso_high, pour_over_low, pour_over_high, french_press_low, french_press_high) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_GRINDER_SQL: &str = "UPDATE grinders SET name = ?1, default_setting = ?2, min_setting = ?3, max_setting = ?4, step = ?5, espresso_low = ?6, espresso_high = ?7, pour_over_low = ?8, pour_over_high = ?9, french_press_low = ?10, french_press_high = ?11 WHERE id = ?12";
const DELETE_GRINDER_SQL: &str = "DELETE FROM grinders WHERE id = ?1";

/// Inserts a grinder row unless the ID is taken. Returns whether a row was
/// written.
pub(super) fn write_grinder(conn: &Connection, grinder: &GrinderProfile) -> Result<bool> {
    let ranges = grinder.ranges.unwrap_or_default();
    let written = conn
        .execute(
            INSERT_GRINDER_SQL,
            params![
                grinder.id.to_string(),
                grinder.name,
                grinder.default_setting,
                grinder.min_setting,
                grinder.max_setting,
                grinder.step,
                ranges.espresso.map(|r| r.0),
                ranges.espresso.map(|r| r.1),
                ranges.pour_over.map(|r| r.0),
                ranges.pour_over.map(|r| r.1),
                ranges.french_press.map(|r| r.0),
                ranges.french_press.map(|r| r.1),
            ],
        )
        .db_context("Failed to insert grinder")?;
    Ok(written > 0)
}

impl super::Database {
    fn build_grinder_from_row(row: &rusqlite::Row) -> rusqlite::Result<GrinderProfile> {
        let ranges = GrindRanges {
            espresso: range_columns(row, 6)?,
            pour_over: range_columns(row, 8)?,
            french_press: range_columns(row, 10)?,
        };
        Ok(GrinderProfile {
            id: uuid_column(row, 0)?,
            name: row.get(1)?,
            default_setting: row.get(2)?,
            min_setting: row.get(3)?,
            max_setting: row.get(4)?,
            step: row.get(5)?,
            ranges: (!ranges.is_empty()).then_some(ranges),
        })
    }

    /// Adds a grinder profile.
    pub fn create_grinder(&self, params: &CreateGrinder) -> Result<GrinderProfile> {
        let grinder = GrinderProfile {
            id: Uuid::new_v4(),
            name: params.name.clone(),
            default_setting: params.default_setting,
            min_setting: params.min_setting,
            max_setting: params.max_setting,
            step: params.step,
            ranges: params.ranges.filter(|r| !r.is_empty()),
        };
        write_grinder(&self.connection, &grinder)?;
        Ok(grinder)
    }

    /// Stores a grinder unless one with the same ID exists.
    pub fn insert_grinder(&self, grinder: &GrinderProfile) -> Result<bool> {
        write_grinder(&self.connection, grinder)
    }

    /// Retrieves a grinder by its ID.
    pub fn get_grinder(&self, id: Uuid) -> Result<Option<GrinderProfile>> {
        self.connection
            .query_row(
                &format!("SELECT {GRINDER_COLUMNS} FROM grinders WHERE id = ?1"),
                params![id.to_string()],
                Self::build_grinder_from_row,
            )
            .optional()
            .db_context("Failed to query grinder")
    }

    /// Lists all grinders by name.
    pub fn list_grinders(&self) -> Result<Vec<GrinderProfile>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {GRINDER_COLUMNS} FROM grinders ORDER BY name"
            ))
            .db_context("Failed to prepare query")?;

        stmt.query_map([], Self::build_grinder_from_row)
            .db_context("Failed to query grinders")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch grinders")
    }

    /// Applies the given changes to a grinder. Returns `None` if it does not
    /// exist.
    pub fn update_grinder(&self, params: &UpdateGrinder) -> Result<Option<GrinderProfile>> {
        let Some(mut grinder) = self.get_grinder(params.id)? else {
            return Ok(None);
        };

        if let Some(name) = &params.name {
            grinder.name = name.clone();
        }
        if let Some(value) = params.default_setting {
            grinder.default_setting = value;
        }
        if let Some(value) = params.min_setting {
            grinder.min_setting = value;
        }
        if let Some(value) = params.max_setting {
            grinder.max_setting = value;
        }
        if let Some(value) = params.step {
            grinder.step = value;
        }
        if let Some(ranges) = params.ranges {
            grinder.ranges = (!ranges.is_empty()).then_some(ranges);
        }

        validate_setting_bounds(
            grinder.min_setting,
            grinder.max_setting,
            grinder.default_setting,
        )?;

        let ranges = grinder.ranges.unwrap_or_default();
        self.connection
            .execute(
                UPDATE_GRINDER_SQL,
                params![
                    grinder.name,
                    grinder.default_setting,
                    grinder.min_setting,
                    grinder.max_setting,
                    grinder.step,
                    ranges.espresso.map(|r| r.0),
                    ranges.espresso.map(|r| r.1),
                    ranges.pour_over.map(|r| r.0),
                    ranges.pour_over.map(|r| r.1),
                    ranges.french_press.map(|r| r.0),
                    ranges.french_press.map(|r| r.1),
                    grinder.id.to_string(),
                ],
            )
            .db_context("Failed to update grinder")?;

        Ok(Some(grinder))
    }

    /// Deletes a grinder profile.
    pub fn delete_grinder(&self, id: Uuid) -> Result<Option<GrinderProfile>> {
        let Some(grinder) = self.get_grinder(id)? else {
            return Ok(None);
        };

        self.connection
            .execute(DELETE_GRINDER_SQL, params![id.to_string()])
            .db_context("Failed to delete grinder")?;

        Ok(Some(grinder))
    }
}
