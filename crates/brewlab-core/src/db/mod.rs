//! Database operations and SQLite management for the local brew store.
//!
//! This module owns the SQLite connection, schema management and the query
//! interfaces for methods (with their steps), beans, grinders, brew records
//! and key/value settings. Every public method here is synchronous; the async
//! façade in [`crate::lab`] runs them on the blocking thread pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod bean_queries;
pub mod grinder_queries;
pub mod method_queries;
pub mod migrations;
pub mod record_queries;
pub mod settings_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the store at `path` and brings the schema up to
    /// date, seeding the default grinders on first use.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let mut db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
