//! Per-step water plan for one brew.

use serde::Serialize;

use super::{
    cumulative_water_targets, incremental_ratio, incremental_water_amounts, total_water_weight,
};
use crate::models::{BrewMethod, StepKind, TargetMode};

/// One row of a [`WaterPlan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterPlanRow {
    pub name: String,
    pub kind: StepKind,
    /// How the stored target is expressed, if there is one
    pub mode: Option<TargetMode>,
    pub duration: u32,
    /// Grams in the brewer by the end of the step
    pub cumulative: Option<f64>,
    /// Grams poured during the step
    pub incremental: f64,
    /// Ratio added during the step, for ratio-mode steps
    pub incremental_ratio: Option<f64>,
}

/// A method's steps resolved against a concrete dose.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterPlan {
    pub method: BrewMethod,
    pub dose: f64,
    pub rows: Vec<WaterPlanRow>,
    /// Total brew water, from the last pour step
    pub total_water: f64,
}

impl WaterPlan {
    pub fn new(method: BrewMethod, dose: f64) -> Self {
        let cumulative = cumulative_water_targets(&method.steps, dose);
        let incremental = incremental_water_amounts(&method.steps, dose);

        let rows = method
            .steps
            .iter()
            .zip(cumulative.into_iter().zip(incremental))
            .enumerate()
            .map(|(index, (step, (cumulative, incremental)))| WaterPlanRow {
                name: step.name.clone(),
                kind: step.kind,
                mode: step.target.mode(),
                duration: step.duration,
                cumulative,
                incremental,
                incremental_ratio: incremental_ratio(&method.steps, index),
            })
            .collect();

        let total_water = total_water_weight(&method, dose);

        Self {
            method,
            dose,
            rows,
            total_water,
        }
    }

    /// Effective brew ratio (`water / dose`), if the dose is positive.
    pub fn effective_ratio(&self) -> Option<f64> {
        (self.dose > 0.0).then(|| self.total_water / self.dose)
    }
}
