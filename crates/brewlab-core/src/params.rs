//! Parameter structures for brewlab operations.
//!
//! These structures are shared by every front-end without pulling in any
//! framework-specific derives. The CLI defines its own clap argument structs
//! and converts them into these with `From` impls, so the core never depends
//! on clap:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   CoffeeLab     │
//! │  (clap derives) │───▶│ (serde only)    │───▶│  (async ops)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{LabError, Result},
    models::{
        BrewStep, GrindRanges, MethodCategory, RoastLevel, SensoryProfile, TargetMode,
    },
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: Uuid,
}

/// Parameters for permanently deleting a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Delete {
    /// The ID of the resource to delete
    pub id: Uuid,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

impl Delete {
    /// Reject unconfirmed deletions.
    pub fn ensure_confirmed(&self) -> Result<()> {
        if self.confirmed {
            Ok(())
        } else {
            Err(LabError::invalid_input("confirmed").with_reason(
                "Deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ))
        }
    }
}

/// Parameters for creating a new brew method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMethod {
    /// Name of the method (required)
    pub name: String,
    /// Method family
    #[serde(default)]
    pub category: MethodCategory,
    /// Recommended water temperature in °C
    #[serde(default = "default_temp")]
    pub recommended_temp: f64,
    /// Recommended water-to-coffee ratio
    #[serde(default = "default_ratio")]
    pub recommended_ratio: f64,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Steps in pour order
    #[serde(default)]
    pub steps: Vec<BrewStep>,
}

fn default_temp() -> f64 {
    92.0
}

fn default_ratio() -> f64 {
    15.0
}

impl Default for CreateMethod {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: MethodCategory::default(),
            recommended_temp: default_temp(),
            recommended_ratio: default_ratio(),
            description: None,
            steps: Vec::new(),
        }
    }
}

impl CreateMethod {
    /// Check the fields a method cannot be saved without.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_positive("recommended_ratio", self.recommended_ratio)
    }
}

/// Parameters for updating an existing brew method.
///
/// Fields left as `None` are unchanged. Supplying `steps` replaces the whole
/// step list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMethod {
    /// Method ID to update (required)
    pub id: Uuid,
    pub name: Option<String>,
    pub category: Option<MethodCategory>,
    pub recommended_temp: Option<f64>,
    pub recommended_ratio: Option<f64>,
    pub description: Option<String>,
    pub steps: Option<Vec<BrewStep>>,
}

impl UpdateMethod {
    /// Validate the fields that are being changed.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(ratio) = self.recommended_ratio {
            validate_positive("recommended_ratio", ratio)?;
        }
        Ok(())
    }

    /// Human-readable list of the fields this update touches.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(format!("Renamed to '{name}'"));
        }
        if let Some(category) = self.category {
            changes.push(format!("Category set to {}", category.as_str()));
        }
        if let Some(temp) = self.recommended_temp {
            changes.push(format!("Temperature set to {temp}°C"));
        }
        if let Some(ratio) = self.recommended_ratio {
            changes.push(format!("Ratio set to 1:{ratio}"));
        }
        if self.description.is_some() {
            changes.push("Updated description".to_string());
        }
        if let Some(steps) = &self.steps {
            changes.push(format!("Replaced steps ({} total)", steps.len()));
        }
        changes
    }
}

/// Parameters for inserting a step into a method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertStep {
    /// Method to add the step to
    pub method_id: Uuid,
    /// 0-based position; `None` appends
    pub position: Option<usize>,
    /// The step itself
    pub step: BrewStep,
}

/// Parameters addressing one step of a method by position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepIndex {
    pub method_id: Uuid,
    /// 0-based position of the step
    pub index: usize,
}

/// Parameters for entering a step's target in incremental ratio mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetIncrementalRatio {
    pub method_id: Uuid,
    pub index: usize,
    /// Ratio poured during this step alone
    pub increment: f64,
}

/// Parameters for switching a step between ratio and absolute targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchStepMode {
    pub method_id: Uuid,
    pub index: usize,
    pub mode: TargetMode,
    /// Dose used to convert between grams and ratio
    pub dose: f64,
}

/// Parameters for computing a method's water plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterPlanRequest {
    pub method_id: Uuid,
    /// Coffee dose in grams
    pub dose: f64,
}

/// Parameters for adding a coffee bean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBean {
    pub name: String,
    pub roast_level: RoastLevel,
    pub shop: Option<String>,
    pub purchase_date: Date,
    /// Weight in the bag, in grams
    pub weight: f64,
    pub flavor_notes: Vec<String>,
}

impl CreateBean {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_non_negative("weight", self.weight)
    }
}

/// Parameters for updating a coffee bean; `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBean {
    pub id: Uuid,
    pub name: Option<String>,
    pub roast_level: Option<RoastLevel>,
    pub shop: Option<String>,
    pub purchase_date: Option<Date>,
    pub weight: Option<f64>,
    pub flavor_notes: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

impl UpdateBean {
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(weight) = self.weight {
            validate_non_negative("weight", weight)?;
        }
        Ok(())
    }
}

/// Parameters for listing coffee beans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBeans {
    /// Only beans still marked active
    #[serde(default)]
    pub active_only: bool,
}

/// Parameters for adding a grinder profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGrinder {
    pub name: String,
    pub default_setting: f64,
    pub min_setting: f64,
    pub max_setting: f64,
    pub step: f64,
    pub ranges: Option<GrindRanges>,
}

impl Default for CreateGrinder {
    fn default() -> Self {
        Self {
            name: String::new(),
            default_setting: 0.0,
            min_setting: 0.0,
            max_setting: 10.0,
            step: 0.1,
            ranges: None,
        }
    }
}

impl CreateGrinder {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_positive("step", self.step)?;
        validate_setting_bounds(self.min_setting, self.max_setting, self.default_setting)
    }
}

/// Parameters for updating a grinder profile; `None` fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGrinder {
    pub id: Uuid,
    pub name: Option<String>,
    pub default_setting: Option<f64>,
    pub min_setting: Option<f64>,
    pub max_setting: Option<f64>,
    pub step: Option<f64>,
    pub ranges: Option<GrindRanges>,
}

impl UpdateGrinder {
    /// Checks the fields being changed. Bounds are checked against the
    /// stored profile when the update is applied.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(step) = self.step {
            validate_positive("step", step)?;
        }
        Ok(())
    }
}

/// Parameters for logging a brew.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBrew {
    pub bean_id: Option<Uuid>,
    pub method_id: Option<Uuid>,
    pub grinder_id: Option<Uuid>,
    pub setting_used: f64,
    /// Dose in grams
    pub bean_weight: f64,
    /// Water in grams
    pub water_weight: f64,
    /// Water temperature in °C
    pub temperature: f64,
    /// Total brew time as `mm:ss`
    pub total_time: String,
    #[serde(default)]
    pub sensory: SensoryProfile,
    pub notes: Option<String>,
}

impl Default for LogBrew {
    fn default() -> Self {
        Self {
            bean_id: None,
            method_id: None,
            grinder_id: None,
            setting_used: 0.0,
            bean_weight: 15.0,
            water_weight: 225.0,
            temperature: 92.0,
            total_time: "02:30".to_string(),
            sensory: SensoryProfile::default(),
            notes: None,
        }
    }
}

impl LogBrew {
    pub fn validate(&self) -> Result<()> {
        validate_non_negative("bean_weight", self.bean_weight)?;
        validate_non_negative("water_weight", self.water_weight)?;
        self.sensory.validate()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LabError::invalid_input("name").with_reason("Name must not be empty"));
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(LabError::invalid_input(field)
            .with_reason(format!("Expected a positive number, got {value}")));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(LabError::invalid_input(field)
            .with_reason(format!("Expected a non-negative number, got {value}")));
    }
    Ok(())
}

pub(crate) fn validate_setting_bounds(min: f64, max: f64, default: f64) -> Result<()> {
    if min > max {
        return Err(LabError::invalid_input("min_setting")
            .with_reason(format!("Minimum {min} is above maximum {max}")));
    }
    if !(min..=max).contains(&default) {
        return Err(LabError::invalid_input("default_setting")
            .with_reason(format!("Default {default} is outside {min}-{max}")));
    }
    Ok(())
}
