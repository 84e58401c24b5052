//! High-level repository API for the coffee lab.
//!
//! [`CoffeeLab`] is the one object front-ends talk to. It is built once per
//! process by [`CoffeeLabBuilder`] with an injected database path and passed
//! by reference; there is no global store.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Front-end     │    │   CoffeeLab     │    │    Database     │
//! │   (CLI args)    │───▶│ (async ops,     │───▶│   (via db/)     │
//! │                 │    │  sync, export)  │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every store call opens the SQLite file inside
//! [`tokio::task::spawn_blocking`], so the async runtime is never blocked on
//! disk I/O.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`CoffeeLab`] instances
//! - [`method_ops`]: Methods, water plans, import and export
//! - [`step_ops`]: Step editing inside a method
//! - [`catalog_ops`]: Beans and grinders
//! - [`record_ops`]: Brew log
//! - [`sync_ops`]: Sync endpoint configuration, push and pull
//!
//! # Example
//!
//! ```rust,no_run
//! use brewlab_core::{
//!     CoffeeLabBuilder,
//!     models::{BrewStep, WaterTarget},
//!     params::{CreateMethod, WaterPlanRequest},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let lab = CoffeeLabBuilder::new()
//!     .with_database_path(Some("brewlab.db"))
//!     .build()
//!     .await?;
//!
//! let method = lab
//!     .create_method(&CreateMethod {
//!         name: "Two pours".to_string(),
//!         steps: vec![
//!             BrewStep::pour("Bloom", WaterTarget::Ratio(3.0), 40),
//!             BrewStep::pour("Finish", WaterTarget::Ratio(15.0), 80),
//!         ],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let plan = lab
//!     .water_plan(&WaterPlanRequest { method_id: method.id, dose: 18.0 })
//!     .await?;
//! assert_eq!(plan.total_water, 270.0);
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, time::Duration};

use tokio::task;

use crate::{
    db::Database,
    error::{LabError, Result},
};

pub mod builder;
pub mod catalog_ops;
pub mod method_ops;
pub mod record_ops;
pub mod step_ops;
pub mod sync_ops;

#[cfg(test)]
mod tests;

pub use builder::CoffeeLabBuilder;
pub use sync_ops::{PullReport, PushReport};

/// Main repository interface for methods, catalog, brew log and sync.
pub struct CoffeeLab {
    pub(crate) db_path: PathBuf,
    pub(crate) sync_timeout: Duration,
    pub(crate) sync_url_override: Option<String>,
}

impl CoffeeLab {
    pub(crate) fn new(
        db_path: PathBuf,
        sync_timeout: Duration,
        sync_url_override: Option<String>,
    ) -> Self {
        Self {
            db_path,
            sync_timeout,
            sync_url_override,
        }
    }

    /// Path of the SQLite file backing this lab.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Run `op` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| LabError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
