//! Brew record and sensory profile models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LabError, Result};

/// Tasting scores on a 1–5 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensoryProfile {
    pub aroma: u8,
    pub acidity: u8,
    pub sweetness: u8,
    pub body: u8,
    pub aftertaste: u8,
    pub balance: u8,
    pub overall: u8,
}

impl Default for SensoryProfile {
    fn default() -> Self {
        Self {
            aroma: 3,
            acidity: 3,
            sweetness: 3,
            body: 3,
            aftertaste: 3,
            balance: 3,
            overall: 3,
        }
    }
}

impl SensoryProfile {
    /// Lowest allowed score.
    pub const MIN_SCORE: u8 = 1;
    /// Highest allowed score.
    pub const MAX_SCORE: u8 = 5;

    /// Scores paired with their attribute names, in display order.
    pub fn scores(&self) -> [(&'static str, u8); 7] {
        [
            ("aroma", self.aroma),
            ("acidity", self.acidity),
            ("sweetness", self.sweetness),
            ("body", self.body),
            ("aftertaste", self.aftertaste),
            ("balance", self.balance),
            ("overall", self.overall),
        ]
    }

    /// Check every score lies within `MIN_SCORE..=MAX_SCORE`.
    pub fn validate(&self) -> Result<()> {
        for (name, score) in self.scores() {
            if !(Self::MIN_SCORE..=Self::MAX_SCORE).contains(&score) {
                return Err(LabError::invalid_input(name).with_reason(format!(
                    "Score {score} is outside {}-{}",
                    Self::MIN_SCORE,
                    Self::MAX_SCORE
                )));
            }
        }
        Ok(())
    }
}

/// One logged brew and how it tasted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// When the brew was logged (UTC)
    pub date: Timestamp,

    /// Bean used, if it was in the catalog
    pub bean_id: Option<Uuid>,

    /// Bean name at the time of brewing
    pub bean_name: String,

    /// Method used
    pub method_id: Option<Uuid>,

    /// Grinder used
    pub grinder_id: Option<Uuid>,

    /// Grinder setting used
    pub setting_used: f64,

    /// Dose in grams
    pub bean_weight: f64,

    /// Total water in grams
    pub water_weight: f64,

    /// Water temperature in °C
    pub temperature: f64,

    /// Total brew time as `mm:ss`
    pub total_time: String,

    /// Tasting scores
    pub sensory: SensoryProfile,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
