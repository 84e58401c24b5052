//! Guided brew timer.
//!
//! The timer is a plain state machine advanced one second at a time by the
//! caller; it never sleeps or spawns anything itself. Each [`BrewTimer::tick`]
//! reports the step transitions and completion the caller should announce.

use crate::models::BrewStep;

/// Index of the step running at `elapsed` seconds.
///
/// Past the end of the method this stays on the last step; an empty list
/// yields `0`.
pub fn current_step_index(steps: &[BrewStep], elapsed: u32) -> usize {
    let mut accumulated = 0u32;
    for (index, step) in steps.iter().enumerate() {
        accumulated = accumulated.saturating_add(step.duration);
        if elapsed < accumulated {
            return index;
        }
    }
    steps.len().saturating_sub(1)
}

/// Sum of step durations in seconds.
pub fn total_duration(steps: &[BrewStep]) -> u32 {
    steps.iter().map(|s| s.duration).sum()
}

/// Completion percentage in `0.0..=100.0`; `0` when the method has no
/// duration at all.
pub fn progress_percent(steps: &[BrewStep], elapsed: u32) -> f64 {
    let total = total_duration(steps);
    if total == 0 {
        return 0.0;
    }
    (f64::from(elapsed) / f64::from(total) * 100.0).min(100.0)
}

/// Format seconds as `mm:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Lifecycle of a brew timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// Something the caller should announce after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A new step began
    StepStarted(usize),
    /// The last step ran out
    Finished,
}

/// Timer over a fixed list of steps.
#[derive(Debug, Clone)]
pub struct BrewTimer {
    steps: Vec<BrewStep>,
    status: TimerStatus,
    elapsed: u32,
    last_step: Option<usize>,
}

impl BrewTimer {
    /// Create an idle timer for the given steps.
    pub fn new(steps: Vec<BrewStep>) -> Self {
        Self {
            steps,
            status: TimerStatus::Idle,
            elapsed: 0,
            last_step: None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn steps(&self) -> &[BrewStep] {
        &self.steps
    }

    /// Index of the step currently running.
    pub fn current_step_index(&self) -> usize {
        current_step_index(&self.steps, self.elapsed)
    }

    /// Step currently running, if the method has any.
    pub fn current_step(&self) -> Option<&BrewStep> {
        self.steps.get(self.current_step_index())
    }

    pub fn progress_percent(&self) -> f64 {
        progress_percent(&self.steps, self.elapsed)
    }

    /// Start or resume. Starting a finished timer rewinds it first.
    pub fn start(&mut self) {
        if self.status == TimerStatus::Finished {
            self.reset();
        }
        if self.last_step.is_none() {
            self.last_step = Some(self.current_step_index());
        }
        self.status = TimerStatus::Running;
    }

    pub fn pause(&mut self) {
        if self.status == TimerStatus::Running {
            self.status = TimerStatus::Paused;
        }
    }

    /// Stop and rewind to zero.
    pub fn reset(&mut self) {
        self.status = TimerStatus::Idle;
        self.elapsed = 0;
        self.last_step = None;
    }

    /// Pause when running, start otherwise.
    pub fn toggle(&mut self) {
        if self.status == TimerStatus::Running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Advance one second. Does nothing unless the timer is running.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.status != TimerStatus::Running {
            return events;
        }

        self.elapsed += 1;

        // The step running at start was set by `start`, so every change
        // seen here is a new step.
        let index = self.current_step_index();
        if self.last_step != Some(index) {
            events.push(TimerEvent::StepStarted(index));
            self.last_step = Some(index);
        }

        if self.elapsed >= total_duration(&self.steps) {
            self.status = TimerStatus::Finished;
            events.push(TimerEvent::Finished);
        }

        events
    }
}
