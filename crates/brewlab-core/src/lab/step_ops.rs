//! Step editing within a stored method.
//!
//! Each edit loads the method, changes its step list in memory and writes the
//! whole list back in one transaction.

use uuid::Uuid;

use super::CoffeeLab;
use crate::{
    calculator,
    db::Database,
    error::{LabError, Result},
    models::{BrewMethod, BrewStep},
    params::{InsertStep, SetIncrementalRatio, StepIndex, SwitchStepMode},
};

fn check_index(steps: &[BrewStep], index: usize) -> Result<()> {
    if index >= steps.len() {
        return Err(LabError::invalid_input("index").with_reason(format!(
            "Index {index} is out of range. Method has {} steps",
            steps.len()
        )));
    }
    Ok(())
}

/// Load a method's steps, apply `edit`, and store the result.
fn edit_steps<F>(db: &mut Database, method_id: Uuid, edit: F) -> Result<BrewMethod>
where
    F: FnOnce(&mut Vec<BrewStep>) -> Result<()>,
{
    let method = db
        .get_method(method_id)?
        .ok_or(LabError::MethodNotFound { id: method_id })?;

    let mut steps = method.steps;
    edit(&mut steps)?;
    db.replace_steps(method_id, &steps)
}

impl CoffeeLab {
    /// Inserts a step at `position`, or appends it when no position is given.
    pub async fn insert_step(&self, params: &InsertStep) -> Result<BrewMethod> {
        let params = params.clone();
        self.with_db(move |db| {
            edit_steps(db, params.method_id, |steps| {
                let position = params.position.unwrap_or(steps.len());
                if position > steps.len() {
                    return Err(LabError::invalid_input("position").with_reason(format!(
                        "Position {position} is out of range. Method has {} steps",
                        steps.len()
                    )));
                }
                steps.insert(position, params.step);
                Ok(())
            })
        })
        .await
    }

    /// Removes the step at `index`.
    pub async fn remove_step(&self, params: &StepIndex) -> Result<BrewMethod> {
        let StepIndex { method_id, index } = *params;
        self.with_db(move |db| {
            edit_steps(db, method_id, |steps| {
                check_index(steps, index)?;
                steps.remove(index);
                Ok(())
            })
        })
        .await
    }

    /// Sets the ratio poured during one step, keeping later increments.
    pub async fn set_incremental_ratio(&self, params: &SetIncrementalRatio) -> Result<BrewMethod> {
        let SetIncrementalRatio {
            method_id,
            index,
            increment,
        } = *params;
        self.with_db(move |db| {
            edit_steps(db, method_id, |steps| {
                check_index(steps, index)?;
                calculator::set_incremental_ratio(steps, index, increment);
                Ok(())
            })
        })
        .await
    }

    /// Switches one step between ratio and absolute targets.
    pub async fn switch_step_mode(&self, params: &SwitchStepMode) -> Result<BrewMethod> {
        let SwitchStepMode {
            method_id,
            index,
            mode,
            dose,
        } = *params;
        self.with_db(move |db| {
            edit_steps(db, method_id, |steps| {
                check_index(steps, index)?;
                calculator::switch_step_mode(&mut steps[index], mode, dose);
                Ok(())
            })
        })
        .await
    }
}
