//! Guided brew timer driven by a tokio interval.

use std::time::Duration;

use anyhow::{Context, Result};
use brewlab_core::{BrewTimer, StepKind, TimerEvent, WaterPlan, timer::format_clock};
use log::debug;
use tokio::{signal, time};

use crate::renderer::TerminalRenderer;

/// What to do during step `index`, prefixed with the clock.
fn step_line(plan: &WaterPlan, index: usize, elapsed: u32) -> String {
    let Some(row) = plan.rows.get(index) else {
        return String::new();
    };

    let action = match (row.kind, row.cumulative) {
        (StepKind::Pour, Some(total)) => {
            format!("pour {} g (to {} g)", row.incremental.round(), total.round())
        }
        (StepKind::Pour, None) => "pour".to_string(),
        (StepKind::Wait, _) => format!("wait {}", format_clock(row.duration)),
    };

    format!(
        "**{}** Step {}/{}: {}, {action}",
        format_clock(elapsed),
        index + 1,
        plan.rows.len(),
        row.name
    )
}

/// Run the timer over `plan` until it finishes or Ctrl-C is pressed.
///
/// One timer second lasts `tick`. Returns `true` when the brew ran to the
/// end.
pub async fn run(plan: &WaterPlan, tick: Duration, renderer: &TerminalRenderer) -> Result<bool> {
    if plan.rows.is_empty() {
        renderer.line("No steps in this method.");
        return Ok(false);
    }

    let mut timer = BrewTimer::new(plan.method.steps.clone());
    renderer.line(&step_line(plan, 0, 0));
    timer.start();

    let mut interval = time::interval(tick);
    // The first tick of an interval completes immediately
    interval.tick().await;

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                for event in timer.tick() {
                    match event {
                        TimerEvent::StepStarted(index) => {
                            renderer.line(&step_line(plan, index, timer.elapsed()));
                        }
                        TimerEvent::Finished => {
                            renderer.line(&format!(
                                "**{}** Done. Total water {} g.",
                                format_clock(timer.elapsed()),
                                plan.total_water.round()
                            ));
                            return Ok(true);
                        }
                    }
                }
            }
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                timer.pause();
                debug!("Timer interrupted at {}s", timer.elapsed());
                renderer.line(&format!(
                    "Stopped at {} ({:.0}% done)",
                    format_clock(timer.elapsed()),
                    timer.progress_percent()
                ));
                return Ok(false);
            }
        }
    }
}
