//! Brew method model definition.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BrewStep, StepKind};

/// Broad family a brew method belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MethodCategory {
    /// Pour-over and other percolation methods
    #[default]
    Drip,

    /// Full immersion (French press, Clever, ...)
    Immersion,

    /// Pressure extraction
    Espresso,

    /// Mixed percolation and immersion
    Hybrid,
}

impl FromStr for MethodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drip" => Ok(MethodCategory::Drip),
            "immersion" => Ok(MethodCategory::Immersion),
            "espresso" => Ok(MethodCategory::Espresso),
            "hybrid" => Ok(MethodCategory::Hybrid),
            _ => Err(format!("Invalid method category: {s}")),
        }
    }
}

impl MethodCategory {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodCategory::Drip => "drip",
            MethodCategory::Immersion => "immersion",
            MethodCategory::Espresso => "espresso",
            MethodCategory::Hybrid => "hybrid",
        }
    }
}

/// An ordered sequence of brew steps plus brewing metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrewMethod {
    /// Unique identifier for the method
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Method family
    pub category: MethodCategory,

    /// Recommended water temperature in °C
    pub recommended_temp: f64,

    /// Recommended grams of water per gram of coffee (15 means 1:15)
    pub recommended_ratio: f64,

    /// Steps in pour order
    #[serde(default)]
    pub steps: Vec<BrewStep>,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Timestamp when the method was created (UTC)
    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    /// Timestamp when the method was last modified (UTC)
    #[serde(default = "Timestamp::now")]
    pub updated_at: Timestamp,
}

impl BrewMethod {
    /// Sum of all step durations, in seconds.
    pub fn total_duration(&self) -> u32 {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Number of pour steps.
    pub fn pour_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Pour)
            .count()
    }
}
