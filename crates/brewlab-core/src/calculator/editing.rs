//! Step edits made while authoring a method.

use super::{effective_water_target, incremental_ratio};
use crate::models::{BrewStep, TargetMode, WaterTarget};

/// Set the ratio poured during `steps[index]` alone.
///
/// The step is put into ratio mode with a cumulative ratio of the previous
/// step's ratio (or `0`) plus `increment`. Later steps that are in ratio mode
/// are re-anchored so their own incremental ratios stay the same; other steps
/// are left alone. Returns `false` without touching anything when `index` is
/// out of range.
pub fn set_incremental_ratio(steps: &mut [BrewStep], index: usize, increment: f64) -> bool {
    if index >= steps.len() {
        return false;
    }

    let later: Vec<Option<f64>> = (index + 1..steps.len())
        .map(|i| incremental_ratio(steps, i))
        .collect();

    let previous = |steps: &[BrewStep], i: usize| {
        i.checked_sub(1)
            .and_then(|prev| steps[prev].target.ratio())
            .unwrap_or(0.0)
    };

    steps[index].target = WaterTarget::Ratio(previous(steps, index) + increment);

    for (offset, kept) in later.into_iter().enumerate() {
        let i = index + 1 + offset;
        if let Some(kept) = kept {
            steps[i].target = WaterTarget::Ratio(previous(steps, i) + kept);
        }
    }

    true
}

/// Switch a step between ratio and absolute targets.
///
/// A target already in the requested mode is kept. Otherwise the value is
/// converted through `dose`: grams become `grams / dose` (or `1` when the dose
/// is not positive) and a ratio becomes its effective grams. A step without a
/// target starts at ratio `1` or `0` grams.
pub fn switch_step_mode(step: &mut BrewStep, mode: TargetMode, dose: f64) {
    step.target = match (mode, step.target) {
        (TargetMode::Ratio, WaterTarget::Ratio(ratio)) => WaterTarget::Ratio(ratio),
        (TargetMode::Ratio, WaterTarget::Absolute(grams)) if dose > 0.0 => {
            WaterTarget::Ratio(grams / dose)
        }
        (TargetMode::Ratio, _) => WaterTarget::Ratio(1.0),
        (TargetMode::Absolute, WaterTarget::Absolute(grams)) => WaterTarget::Absolute(grams),
        (TargetMode::Absolute, WaterTarget::Ratio(_)) => {
            WaterTarget::Absolute(effective_water_target(step, dose).unwrap_or(0.0))
        }
        (TargetMode::Absolute, WaterTarget::None) => WaterTarget::Absolute(0.0),
    };
}
