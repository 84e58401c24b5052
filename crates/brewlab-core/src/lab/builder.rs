//! Builder for creating and configuring CoffeeLab instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use tokio::task;

use super::CoffeeLab;
use crate::{
    db::Database,
    error::{LabError, Result},
};

/// Timeout applied to sync requests unless configured otherwise.
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(10);

/// Builder for creating and configuring CoffeeLab instances.
#[derive(Debug, Clone)]
pub struct CoffeeLabBuilder {
    database_path: Option<PathBuf>,
    sync_timeout: Duration,
    sync_url: Option<String>,
}

impl CoffeeLabBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            sync_url: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/brewlab/brewlab.db` or `~/.local/share/brewlab/brewlab.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long a sync request may take before it counts as failed.
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    /// Uses `url` as the sync endpoint for this instance instead of the one
    /// stored in the database.
    pub fn with_sync_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.sync_url = Some(url);
        }
        self
    }

    /// Builds the configured lab instance.
    ///
    /// # Errors
    ///
    /// Returns `LabError::FileSystem` if the database directory cannot be
    /// created, `LabError::XdgDirectory` if no default location is available
    /// and `LabError::Database` if database initialization fails.
    pub async fn build(self) -> Result<CoffeeLab> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| LabError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), LabError>(())
        })
        .await
        .map_err(|e| LabError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("Opened brew store at {}", db_path.display());

        Ok(CoffeeLab::new(db_path, self.sync_timeout, self.sync_url))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("brewlab")
            .place_data_file("brewlab.db")
            .map_err(|e| LabError::XdgDirectory(e.to_string()))
    }
}

impl Default for CoffeeLabBuilder {
    fn default() -> Self {
        Self::new()
    }
}
