//! Database schema initialization and first-run seeding.

use log::debug;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::GrinderProfile,
};

const GRINDERS_SEEDED_KEY: &str = "grinders_seeded";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&mut self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.seed_default_grinders()?;

        Ok(())
    }

    /// Insert the default grinder profiles the first time a store is opened.
    ///
    /// A settings flag records that seeding happened, so grinders the user
    /// deletes afterwards stay deleted.
    fn seed_default_grinders(&mut self) -> Result<()> {
        if self.get_setting(GRINDERS_SEEDED_KEY)?.is_some() {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let defaults = GrinderProfile::defaults();
        for grinder in &defaults {
            super::grinder_queries::write_grinder(&tx, grinder)?;
        }
        tx.execute(
            super::settings_queries::UPSERT_SETTING_SQL,
            params![GRINDERS_SEEDED_KEY, "true"],
        )
        .db_context("Failed to record grinder seeding")?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!("Seeded {} default grinder profiles", defaults.len());
        Ok(())
    }
}
