//! Brew method CRUD operations and step persistence.
//!
//! Steps are owned by their method: they are always written as a whole list
//! inside the same transaction as the method row, and `step_order` is the
//! 0-based index into that list.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, Transaction, params};
use uuid::Uuid;

use super::utils::{parsed_column, timestamp_column, uuid_column};
use crate::{
    error::{DatabaseResultExt, LabError, Result},
    models::{BrewMethod, BrewStep, WaterTarget},
    params::{CreateMethod, UpdateMethod},
};

const INSERT_METHOD_SQL: &str = "INSERT INTO methods (id, name, category, recommended_temp, recommended_ratio, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_METHOD_SQL: &str = "SELECT id, name, category, recommended_temp, recommended_ratio, description, created_at, updated_at FROM methods WHERE id = ?1";
const SELECT_METHODS_SQL: &str = "SELECT id, name, category, recommended_temp, recommended_ratio, description, created_at, updated_at FROM methods ORDER BY created_at DESC";
const CHECK_METHOD_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM methods WHERE id = ?1)";
const UPDATE_METHOD_SQL: &str = "UPDATE methods SET name = ?1, category = ?2, recommended_temp = ?3, recommended_ratio = ?4, description = ?5, updated_at = ?6 WHERE id = ?7";
const TOUCH_METHOD_SQL: &str = "UPDATE methods SET updated_at = ?1 WHERE id = ?2";
const DELETE_METHOD_SQL: &str = "DELETE FROM methods WHERE id = ?1";

const SELECT_STEPS_SQL: &str = "SELECT name, kind, water_end_target, water_end_target_ratio, duration, description FROM brew_steps WHERE method_id = ?1 ORDER BY step_order";
const DELETE_STEPS_SQL: &str = "DELETE FROM brew_steps WHERE method_id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO brew_steps (method_id, step_order, name, kind, water_end_target, water_end_target_ratio, duration, description) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// Replace every step row of a method with `steps`, in order.
fn write_steps(tx: &Transaction, method_id: Uuid, steps: &[BrewStep]) -> Result<()> {
    tx.execute(DELETE_STEPS_SQL, params![method_id.to_string()])
        .db_context("Failed to clear method steps")?;

    for (order, step) in steps.iter().enumerate() {
        tx.execute(
            INSERT_STEP_SQL,
            params![
                method_id.to_string(),
                order as i64,
                step.name,
                step.kind.as_str(),
                step.target.absolute(),
                step.target.ratio(),
                i64::from(step.duration),
                step.description,
            ],
        )
        .db_context("Failed to insert step")?;
    }

    Ok(())
}

fn write_method(tx: &Transaction, method: &BrewMethod) -> Result<()> {
    tx.execute(
        INSERT_METHOD_SQL,
        params![
            method.id.to_string(),
            method.name,
            method.category.as_str(),
            method.recommended_temp,
            method.recommended_ratio,
            method.description,
            method.created_at.to_string(),
            method.updated_at.to_string(),
        ],
    )
    .db_context("Failed to insert method")?;

    write_steps(tx, method.id, &method.steps)
}

impl super::Database {
    fn build_method_from_row(row: &rusqlite::Row) -> rusqlite::Result<BrewMethod> {
        Ok(BrewMethod {
            id: uuid_column(row, 0)?,
            name: row.get(1)?,
            category: parsed_column(row, 2)?,
            recommended_temp: row.get(3)?,
            recommended_ratio: row.get(4)?,
            description: row.get(5)?,
            created_at: timestamp_column(row, 6)?,
            updated_at: timestamp_column(row, 7)?,
            steps: Vec::new(),
        })
    }

    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<BrewStep> {
        let duration: i64 = row.get(4)?;
        Ok(BrewStep {
            name: row.get(0)?,
            kind: parsed_column(row, 1)?,
            target: WaterTarget::from_fields(row.get(2)?, row.get(3)?),
            duration: u32::try_from(duration).unwrap_or(0),
            description: row.get(5)?,
        })
    }

    /// Creates a new method with a fresh ID and the given steps.
    pub fn create_method(&mut self, params: &CreateMethod) -> Result<BrewMethod> {
        let now = Timestamp::now();
        let method = BrewMethod {
            id: Uuid::new_v4(),
            name: params.name.clone(),
            category: params.category,
            recommended_temp: params.recommended_temp,
            recommended_ratio: params.recommended_ratio,
            steps: params.steps.clone(),
            description: params.description.clone(),
            created_at: now,
            updated_at: now,
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        write_method(&tx, &method)?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(method)
    }

    /// Stores a complete method as-is unless a method with the same ID
    /// already exists. Returns whether it was inserted.
    pub fn insert_method(&mut self, method: &BrewMethod) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_METHOD_EXISTS_SQL,
                params![method.id.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check method existence")?;
        if exists {
            return Ok(false);
        }

        write_method(&tx, method)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(true)
    }

    /// Retrieves a method by its ID, steps included.
    pub fn get_method(&self, id: Uuid) -> Result<Option<BrewMethod>> {
        let mut method = self
            .connection
            .query_row(
                SELECT_METHOD_SQL,
                params![id.to_string()],
                Self::build_method_from_row,
            )
            .optional()
            .db_context("Failed to query method")?;

        if let Some(ref mut method) = method {
            method.steps = self.get_steps(method.id)?;
        }

        Ok(method)
    }

    /// Lists all methods, newest first, steps included.
    pub fn list_methods(&self) -> Result<Vec<BrewMethod>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_METHODS_SQL)
            .db_context("Failed to prepare query")?;

        let mut methods = stmt
            .query_map([], Self::build_method_from_row)
            .db_context("Failed to query methods")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch methods")?;

        for method in &mut methods {
            method.steps = self.get_steps(method.id)?;
        }

        Ok(methods)
    }

    /// Steps of a method in order. Unknown methods yield an empty list.
    pub fn get_steps(&self, method_id: Uuid) -> Result<Vec<BrewStep>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map(params![method_id.to_string()], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")
    }

    /// Applies the given changes to a method. Returns `None` if the method
    /// does not exist.
    pub fn update_method(&mut self, params: &UpdateMethod) -> Result<Option<BrewMethod>> {
        let Some(mut method) = self.get_method(params.id)? else {
            return Ok(None);
        };

        if let Some(name) = &params.name {
            method.name = name.clone();
        }
        if let Some(category) = params.category {
            method.category = category;
        }
        if let Some(temp) = params.recommended_temp {
            method.recommended_temp = temp;
        }
        if let Some(ratio) = params.recommended_ratio {
            method.recommended_ratio = ratio;
        }
        if let Some(description) = &params.description {
            method.description = Some(description.clone());
        }
        if let Some(steps) = &params.steps {
            method.steps = steps.clone();
        }
        method.updated_at = Timestamp::now();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPDATE_METHOD_SQL,
            params![
                method.name,
                method.category.as_str(),
                method.recommended_temp,
                method.recommended_ratio,
                method.description,
                method.updated_at.to_string(),
                method.id.to_string(),
            ],
        )
        .db_context("Failed to update method")?;

        if params.steps.is_some() {
            write_steps(&tx, method.id, &method.steps)?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(method))
    }

    /// Replaces the whole step list of a method.
    pub fn replace_steps(&mut self, method_id: Uuid, steps: &[BrewStep]) -> Result<BrewMethod> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let touched = tx
            .execute(
                TOUCH_METHOD_SQL,
                params![now.to_string(), method_id.to_string()],
            )
            .db_context("Failed to update method timestamp")?;
        if touched == 0 {
            return Err(LabError::MethodNotFound { id: method_id });
        }

        write_steps(&tx, method_id, steps)?;
        tx.commit().db_context("Failed to commit transaction")?;

        self.get_method(method_id)?
            .ok_or(LabError::MethodNotFound { id: method_id })
    }

    /// Deletes a method and its steps. Returns the deleted method, or `None`
    /// if it did not exist.
    pub fn delete_method(&mut self, id: Uuid) -> Result<Option<BrewMethod>> {
        let Some(method) = self.get_method(id)? else {
            return Ok(None);
        };

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        tx.execute(DELETE_STEPS_SQL, params![id.to_string()])
            .db_context("Failed to delete method steps")?;
        tx.execute(DELETE_METHOD_SQL, params![id.to_string()])
            .db_context("Failed to delete method")?;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Some(method))
    }
}
