//! Method summary types for list views.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BrewMethod, MethodCategory};

/// Summary information about a brew method with step statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSummary {
    /// Method ID
    pub id: Uuid,
    /// Name of the method
    pub name: String,
    /// Method family
    pub category: MethodCategory,
    /// Optional description
    pub description: Option<String>,
    /// Recommended temperature in °C
    pub recommended_temp: f64,
    /// Recommended water-to-coffee ratio
    pub recommended_ratio: f64,
    /// Total number of steps
    pub total_steps: u32,
    /// Number of pour steps
    pub pour_steps: u32,
    /// Sum of step durations in seconds
    pub total_duration: u32,
    /// Creation timestamp
    pub created_at: Timestamp,
}

impl From<&BrewMethod> for MethodSummary {
    fn from(method: &BrewMethod) -> Self {
        Self {
            id: method.id,
            name: method.name.clone(),
            category: method.category,
            description: method.description.clone(),
            recommended_temp: method.recommended_temp,
            recommended_ratio: method.recommended_ratio,
            total_steps: method.steps.len() as u32,
            pour_steps: method.pour_count() as u32,
            total_duration: method.total_duration(),
            created_at: method.created_at,
        }
    }
}
