//! Brew log operations.

use jiff::Timestamp;
use uuid::Uuid;

use super::CoffeeLab;
use crate::{
    error::Result,
    models::BrewRecord,
    params::{Id, LogBrew},
};

/// Bean name recorded when the brew's bean is not in the catalog.
pub const UNKNOWN_BEAN: &str = "Unknown Bean";

impl CoffeeLab {
    /// Logs a brew.
    ///
    /// The bean's current name is copied into the record so the log still
    /// reads correctly after the bean is renamed or deleted.
    pub async fn log_brew(&self, params: &LogBrew) -> Result<BrewRecord> {
        params.validate()?;
        let params = params.clone();

        self.with_db(move |db| {
            let bean_name = match params.bean_id {
                Some(id) => db.get_bean(id)?.map(|bean| bean.name),
                None => None,
            }
            .unwrap_or_else(|| UNKNOWN_BEAN.to_string());

            let record = BrewRecord {
                id: Uuid::new_v4(),
                date: Timestamp::now(),
                bean_id: params.bean_id,
                bean_name,
                method_id: params.method_id,
                grinder_id: params.grinder_id,
                setting_used: params.setting_used,
                bean_weight: params.bean_weight,
                water_weight: params.water_weight,
                temperature: params.temperature,
                total_time: params.total_time,
                sensory: params.sensory,
                notes: params.notes,
            };
            db.insert_record(&record)?;
            Ok(record)
        })
        .await
    }

    pub async fn get_record(&self, params: &Id) -> Result<Option<BrewRecord>> {
        let id = params.id;
        self.with_db(move |db| db.get_record(id)).await
    }

    /// Lists brew records, newest first.
    pub async fn list_records(&self, limit: Option<usize>) -> Result<Vec<BrewRecord>> {
        self.with_db(move |db| db.list_records(limit)).await
    }
}
