//! Water-target calculations for brew steps.
//!
//! A method's steps carry *cumulative* targets: how much water should be in
//! the brewer by the end of each step, either as absolute grams or as a
//! multiple of the dose. The functions here turn those into concrete gram
//! amounts for a given dose, derive per-step (incremental) pours, and convert
//! incremental entries back into cumulative values.
//!
//! Every function is pure and infallible. Out-of-range indices and steps
//! without a target degrade to `0` or `None` so that interactive editing never
//! fails mid-keystroke; the dose is not validated, so a NaN or negative dose
//! propagates into the result.
//!
//! ```rust
//! use brewlab_core::calculator::{cumulative_from_incremental, incremental_water_amount};
//! use brewlab_core::models::{BrewStep, WaterTarget};
//!
//! let steps: Vec<BrewStep> = [2.0, 6.0, 12.0, 15.0]
//!     .iter()
//!     .map(|r| BrewStep::pour("Pour", WaterTarget::Ratio(*r), 30))
//!     .collect();
//!
//! assert_eq!(incremental_water_amount(&steps, 3, 20.0), 60.0);
//! assert_eq!(
//!     cumulative_from_incremental(&[2.0, 4.0, 6.0, 3.0]),
//!     vec![2.0, 6.0, 12.0, 15.0]
//! );
//! ```

mod editing;
mod plan;
mod recipe;


pub use editing::{set_incremental_ratio, switch_step_mode};
pub use plan::{WaterPlan, WaterPlanRow};
pub use recipe::BrewParams;

use crate::models::{BrewMethod, BrewStep, StepKind, WaterTarget};

/// Cumulative grams that should have been poured by the end of `step`.
///
/// Ratio targets are multiplied by `dose` and rounded half away from zero to
/// the nearest gram. Absolute targets are returned as entered.
pub fn effective_water_target(step: &BrewStep, dose: f64) -> Option<f64> {
    match step.target {
        WaterTarget::Ratio(ratio) => Some((dose * ratio).round()),
        WaterTarget::Absolute(grams) => Some(grams),
        WaterTarget::None => None,
    }
}

/// Grams poured during `steps[index]` alone.
///
/// Only the immediately preceding step is subtracted, and a preceding step
/// without a target counts as zero. The result is negative when a later
/// cumulative target is below the previous one.
pub fn incremental_water_amount(steps: &[BrewStep], index: usize, dose: f64) -> f64 {
    let Some(current) = steps
        .get(index)
        .and_then(|step| effective_water_target(step, dose))
    else {
        return 0.0;
    };

    let previous = index
        .checked_sub(1)
        .and_then(|prev| effective_water_target(&steps[prev], dose))
        .unwrap_or(0.0);

    current - previous
}

/// Ratio added during `steps[index]` alone.
///
/// Looks only at ratio targets: `None` when the index is out of range or the
/// step is not in ratio mode. A preceding step that is not in ratio mode
/// counts as zero.
pub fn incremental_ratio(steps: &[BrewStep], index: usize) -> Option<f64> {
    let current = steps.get(index)?.target.ratio()?;
    let previous = index
        .checked_sub(1)
        .and_then(|prev| steps[prev].target.ratio())
        .unwrap_or(0.0);

    Some(current - previous)
}

/// Total brew water: the effective target of the last pour step.
///
/// This is deliberately not a sum of increments. Returns `0` when the
/// method has no pour step or the last one has no target.
pub fn total_water_weight(method: &BrewMethod, dose: f64) -> f64 {
    method
        .steps
        .iter()
        .rev()
        .find(|step| step.kind == StepKind::Pour)
        .and_then(|step| effective_water_target(step, dose))
        .unwrap_or(0.0)
}

/// Running sum of `values`, used to store incremental entries cumulatively.
pub fn cumulative_from_incremental(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, value| {
            *total += value;
            Some(*total)
        })
        .collect()
}

/// [`incremental_water_amount`] for every step.
pub fn incremental_water_amounts(steps: &[BrewStep], dose: f64) -> Vec<f64> {
    (0..steps.len())
        .map(|index| incremental_water_amount(steps, index, dose))
        .collect()
}

/// [`effective_water_target`] for every step.
pub fn cumulative_water_targets(steps: &[BrewStep], dose: f64) -> Vec<Option<f64>> {
    steps
        .iter()
        .map(|step| effective_water_target(step, dose))
        .collect()
}
