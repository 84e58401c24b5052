//! Sync endpoint configuration, push and pull.
//!
//! The endpoint URL lives in the `settings` table under [`SYNC_URL_KEY`]
//! unless the lab was built with an override. Pull is merge-on-read: remote
//! entities whose ID is unknown locally are inserted, and local data always
//! wins over remote data with the same ID.

use log::info;
use serde::Serialize;

use super::CoffeeLab;
use crate::{
    error::{LabError, Result},
    models::{BrewMethod, BrewRecord, CoffeeBean, GrinderProfile},
    sync::{SheetsClient, SyncKind, bean_payload, entity_payload},
};

/// Settings key holding the sync endpoint URL.
pub const SYNC_URL_KEY: &str = "sync_url";

/// Outcome of pushing the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushReport {
    pub accepted: usize,
    pub rejected: usize,
}

impl PushReport {
    fn record(&mut self, accepted: bool) {
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }
}

/// Entities a pull added to the local store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PullReport {
    pub beans: usize,
    pub grinders: usize,
    pub methods: usize,
    pub records: usize,
}

impl PullReport {
    pub fn total(&self) -> usize {
        self.beans + self.grinders + self.methods + self.records
    }
}

impl CoffeeLab {
    /// The active sync URL: the override if one was given, else the stored
    /// setting.
    pub async fn sync_url(&self) -> Result<Option<String>> {
        if let Some(url) = &self.sync_url_override {
            return Ok(Some(url.clone()));
        }
        self.with_db(|db| db.get_setting(SYNC_URL_KEY)).await
    }

    /// Stores the sync URL.
    pub async fn set_sync_url(&self, url: &str) -> Result<()> {
        let url = url.trim().to_string();
        if url.is_empty() {
            return Err(LabError::invalid_input("url").with_reason("URL must not be empty"));
        }
        self.with_db(move |db| db.set_setting(SYNC_URL_KEY, &url))
            .await
    }

    /// Forgets the stored sync URL. Returns whether one was set.
    pub async fn clear_sync_url(&self) -> Result<bool> {
        self.with_db(|db| db.clear_setting(SYNC_URL_KEY)).await
    }

    async fn sync_client(&self) -> Result<Option<SheetsClient>> {
        match self.sync_url().await? {
            Some(url) => Ok(Some(SheetsClient::new(url, self.sync_timeout)?)),
            None => Ok(None),
        }
    }

    async fn require_sync_client(&self) -> Result<SheetsClient> {
        self.sync_client().await?.ok_or_else(|| LabError::Configuration {
            message: "No sync URL configured".to_string(),
        })
    }

    /// Pushes one method. `false` when no endpoint is configured or the
    /// endpoint did not accept it.
    pub async fn push_method(&self, method: &BrewMethod) -> Result<bool> {
        let Some(client) = self.sync_client().await? else {
            return Ok(false);
        };
        Ok(client.submit(SyncKind::Method, entity_payload(method)?).await)
    }

    /// Pushes one bean with its flavor notes flattened.
    pub async fn push_bean(&self, bean: &CoffeeBean) -> Result<bool> {
        let Some(client) = self.sync_client().await? else {
            return Ok(false);
        };
        Ok(client.submit(SyncKind::Bean, bean_payload(bean)?).await)
    }

    pub async fn push_grinder(&self, grinder: &GrinderProfile) -> Result<bool> {
        let Some(client) = self.sync_client().await? else {
            return Ok(false);
        };
        Ok(client.submit(SyncKind::Grinder, entity_payload(grinder)?).await)
    }

    pub async fn push_record(&self, record: &BrewRecord) -> Result<bool> {
        let Some(client) = self.sync_client().await? else {
            return Ok(false);
        };
        Ok(client.submit(SyncKind::Log, entity_payload(record)?).await)
    }

    /// Pushes every local entity, one request each.
    pub async fn push_all(&self) -> Result<PushReport> {
        let client = self.require_sync_client().await?;
        let (beans, grinders, methods, records) = self
            .with_db(|db| {
                Ok((
                    db.list_beans(None)?,
                    db.list_grinders()?,
                    db.list_methods()?,
                    db.list_records(None)?,
                ))
            })
            .await?;

        let mut report = PushReport::default();
        for bean in &beans {
            report.record(client.submit(SyncKind::Bean, bean_payload(bean)?).await);
        }
        for grinder in &grinders {
            report.record(
                client
                    .submit(SyncKind::Grinder, entity_payload(grinder)?)
                    .await,
            );
        }
        for method in &methods {
            report.record(client.submit(SyncKind::Method, entity_payload(method)?).await);
        }
        for record in &records {
            report.record(client.submit(SyncKind::Log, entity_payload(record)?).await);
        }

        info!(
            "Pushed store to sync endpoint: {} accepted, {} rejected",
            report.accepted, report.rejected
        );
        Ok(report)
    }

    /// Merges remote entities into the local store.
    ///
    /// Returns `None` when the endpoint could not be read.
    pub async fn pull(&self) -> Result<Option<PullReport>> {
        let client = self.require_sync_client().await?;
        let Some(snapshot) = client.fetch_all().await else {
            return Ok(None);
        };

        let beans = snapshot.beans();
        let grinders = snapshot.grinders();
        let methods = snapshot.methods();
        let records = snapshot.records();

        let report = self
            .with_db(move |db| {
                let mut report = PullReport::default();
                for bean in &beans {
                    report.beans += usize::from(db.insert_bean(bean)?);
                }
                for grinder in &grinders {
                    report.grinders += usize::from(db.insert_grinder(grinder)?);
                }
                for method in &methods {
                    report.methods += usize::from(db.insert_method(method)?);
                }
                for record in &records {
                    report.records += usize::from(db.insert_record(record)?);
                }
                Ok(report)
            })
            .await?;

        info!("Pulled {} new entities from sync endpoint", report.total());
        Ok(Some(report))
    }
}
