//! Coffee bean catalog queries.

use rusqlite::{OptionalExtension, params};
use uuid::Uuid;

use super::utils::{date_column, parsed_column, uuid_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{BeanFilter, CoffeeBean, parse_flavor_notes},
    params::{CreateBean, UpdateBean},
};

const BEAN_COLUMNS: &str = "id, name, roast_level, shop, purchase_date, weight, flavor_notes, is_active";
const INSERT_BEAN_SQL: &str = "INSERT OR IGNORE INTO beans (id, name, roast_level, shop, purchase_date, weight, flavor_notes, is_active) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_BEAN_SQL: &str = "UPDATE beans SET name = ?1, roast_level = ?2, shop = ?3, purchase_date = ?4, weight = ?5, flavor_notes = ?6, is_active = ?7 WHERE id = ?8";
const DELETE_BEAN_SQL: &str = "DELETE FROM beans WHERE id = ?1";

/// Flavor notes are stored as one comma-separated column.
fn join_notes(notes: &[String]) -> Option<String> {
    if notes.is_empty() {
        None
    } else {
        Some(notes.join(", "))
    }
}

impl super::Database {
    fn build_bean_from_row(row: &rusqlite::Row) -> rusqlite::Result<CoffeeBean> {
        let notes: Option<String> = row.get(6)?;
        Ok(CoffeeBean {
            id: uuid_column(row, 0)?,
            name: row.get(1)?,
            roast_level: parsed_column(row, 2)?,
            shop: row.get(3)?,
            purchase_date: date_column(row, 4)?,
            weight: row.get(5)?,
            flavor_notes: notes.as_deref().map(parse_flavor_notes).unwrap_or_default(),
            is_active: row.get(7)?,
        })
    }

    /// Adds a bean to the catalog.
    pub fn create_bean(&self, params: &CreateBean) -> Result<CoffeeBean> {
        let bean = CoffeeBean {
            id: Uuid::new_v4(),
            name: params.name.clone(),
            roast_level: params.roast_level,
            shop: params.shop.clone(),
            purchase_date: params.purchase_date,
            weight: params.weight,
            flavor_notes: params.flavor_notes.clone(),
            is_active: true,
        };
        self.insert_bean(&bean)?;
        Ok(bean)
    }

    /// Stores a bean unless one with the same ID exists. Returns whether it
    /// was inserted.
    pub fn insert_bean(&self, bean: &CoffeeBean) -> Result<bool> {
        let inserted = self
            .connection
            .execute(
                INSERT_BEAN_SQL,
                params![
                    bean.id.to_string(),
                    bean.name,
                    bean.roast_level.as_str(),
                    bean.shop,
                    bean.purchase_date.to_string(),
                    bean.weight,
                    join_notes(&bean.flavor_notes),
                    bean.is_active,
                ],
            )
            .db_context("Failed to insert bean")?;
        Ok(inserted > 0)
    }

    /// Retrieves a bean by its ID.
    pub fn get_bean(&self, id: Uuid) -> Result<Option<CoffeeBean>> {
        self.connection
            .query_row(
                &format!("SELECT {BEAN_COLUMNS} FROM beans WHERE id = ?1"),
                params![id.to_string()],
                Self::build_bean_from_row,
            )
            .optional()
            .db_context("Failed to query bean")
    }

    /// Lists beans, most recently purchased first.
    pub fn list_beans(&self, filter: Option<&BeanFilter>) -> Result<Vec<CoffeeBean>> {
        let mut query = format!("SELECT {BEAN_COLUMNS} FROM beans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if f.active_only {
                conditions.push("is_active = 1");
            }

            if let Some(roast) = f.roast_level {
                conditions.push("roast_level = ?");
                params_vec.push(Box::new(roast.as_str().to_string()));
            }

            if let Some(ref name) = f.name_contains {
                conditions.push("name LIKE ?");
                params_vec.push(Box::new(format!("%{name}%")));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY purchase_date DESC, name");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        stmt.query_map(&params_refs[..], Self::build_bean_from_row)
            .db_context("Failed to query beans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch beans")
    }

    /// Applies the given changes to a bean. Returns `None` if it does not
    /// exist.
    pub fn update_bean(&self, params: &UpdateBean) -> Result<Option<CoffeeBean>> {
        let Some(mut bean) = self.get_bean(params.id)? else {
            return Ok(None);
        };

        if let Some(name) = &params.name {
            bean.name = name.clone();
        }
        if let Some(roast) = params.roast_level {
            bean.roast_level = roast;
        }
        if let Some(shop) = &params.shop {
            bean.shop = Some(shop.clone());
        }
        if let Some(date) = params.purchase_date {
            bean.purchase_date = date;
        }
        if let Some(weight) = params.weight {
            bean.weight = weight;
        }
        if let Some(notes) = &params.flavor_notes {
            bean.flavor_notes = notes.clone();
        }
        if let Some(active) = params.is_active {
            bean.is_active = active;
        }

        self.connection
            .execute(
                UPDATE_BEAN_SQL,
                params![
                    bean.name,
                    bean.roast_level.as_str(),
                    bean.shop,
                    bean.purchase_date.to_string(),
                    bean.weight,
                    join_notes(&bean.flavor_notes),
                    bean.is_active,
                    bean.id.to_string(),
                ],
            )
            .db_context("Failed to update bean")?;

        Ok(Some(bean))
    }

    /// Deletes a bean. Brew records keep their bean name snapshot.
    pub fn delete_bean(&self, id: Uuid) -> Result<Option<CoffeeBean>> {
        let Some(bean) = self.get_bean(id)? else {
            return Ok(None);
        };

        self.connection
            .execute(DELETE_BEAN_SQL, params![id.to_string()])
            .db_context("Failed to delete bean")?;

        Ok(Some(bean))
    }
}
