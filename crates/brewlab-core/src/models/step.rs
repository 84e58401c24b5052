//! Brew step model and its water target.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of brew step kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Water is poured during the step
    #[default]
    Pour,

    /// Nothing is poured; the bed drains or steeps
    Wait,
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pour" => Ok(StepKind::Pour),
            "wait" => Ok(StepKind::Wait),
            _ => Err(format!("Invalid step kind: {s}")),
        }
    }
}

impl StepKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Pour => "pour",
            StepKind::Wait => "wait",
        }
    }
}

/// How a step's cumulative water target is expressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// Multiple of the coffee dose
    Ratio,

    /// Absolute grams of water
    Absolute,
}

impl FromStr for TargetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratio" => Ok(TargetMode::Ratio),
            "absolute" | "grams" => Ok(TargetMode::Absolute),
            _ => Err(format!("Invalid target mode: {s}")),
        }
    }
}

/// Cumulative water that should have been poured by the end of a step.
///
/// Stored records carry two optional fields (absolute grams and ratio
/// multiplier). They are folded into this variant once, when the record is
/// read: a present ratio always wins over an absolute value, and a ratio of
/// exactly `0` still counts as ratio mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WaterTarget {
    /// No water target (wait steps, or pour steps not yet configured)
    #[default]
    None,

    /// Absolute cumulative grams
    Absolute(f64),

    /// Cumulative multiple of the dose
    Ratio(f64),
}

impl WaterTarget {
    /// Build a target from the two legacy optional fields.
    pub fn from_fields(absolute: Option<f64>, ratio: Option<f64>) -> Self {
        match (ratio, absolute) {
            (Some(ratio), _) => WaterTarget::Ratio(ratio),
            (None, Some(grams)) => WaterTarget::Absolute(grams),
            (None, None) => WaterTarget::None,
        }
    }

    /// Absolute grams, if the target is in absolute mode.
    pub fn absolute(&self) -> Option<f64> {
        match self {
            WaterTarget::Absolute(grams) => Some(*grams),
            _ => None,
        }
    }

    /// Ratio multiplier, if the target is in ratio mode.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            WaterTarget::Ratio(ratio) => Some(*ratio),
            _ => None,
        }
    }

    /// The mode this target is expressed in, if any.
    pub fn mode(&self) -> Option<TargetMode> {
        match self {
            WaterTarget::None => None,
            WaterTarget::Absolute(_) => Some(TargetMode::Absolute),
            WaterTarget::Ratio(_) => Some(TargetMode::Ratio),
        }
    }

    /// Whether any target is set.
    pub fn is_set(&self) -> bool {
        !matches!(self, WaterTarget::None)
    }
}

/// One stage of a brew method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "StepDocument", into = "StepDocument")]
pub struct BrewStep {
    /// Display label
    pub name: String,

    /// Whether water is poured during this step
    pub kind: StepKind,

    /// Cumulative water target at the end of this step
    pub target: WaterTarget,

    /// How long the step lasts, in seconds
    pub duration: u32,

    /// Optional free-text instructions
    pub description: Option<String>,
}

impl BrewStep {
    /// A pour step with the given cumulative target.
    pub fn pour(name: impl Into<String>, target: WaterTarget, duration: u32) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Pour,
            target,
            duration,
            description: None,
        }
    }

    /// A wait step. Wait steps never carry a water target.
    pub fn wait(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            kind: StepKind::Wait,
            target: WaterTarget::None,
            duration,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Wire form of a step, compatible with exported method documents.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepDocument {
    name: String,
    #[serde(rename = "type", alias = "kind")]
    kind: StepKind,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "cumulativeAbsoluteTarget"
    )]
    water_end_target: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "cumulativeRatioTarget"
    )]
    water_end_target_ratio: Option<f64>,
    #[serde(alias = "durationSeconds")]
    duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl From<StepDocument> for BrewStep {
    fn from(doc: StepDocument) -> Self {
        Self {
            name: doc.name,
            kind: doc.kind,
            target: WaterTarget::from_fields(doc.water_end_target, doc.water_end_target_ratio),
            duration: doc.duration,
            description: doc.description,
        }
    }
}

impl From<BrewStep> for StepDocument {
    fn from(step: BrewStep) -> Self {
        Self {
            name: step.name,
            kind: step.kind,
            water_end_target: step.target.absolute(),
            water_end_target_ratio: step.target.ratio(),
            duration: step.duration,
            description: step.description,
        }
    }
}
