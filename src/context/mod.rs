// src/context/mod.rs

use crate::memory::{Memory, RecordKind, Trajectory};
use crate::protocol::StepOutcome;

/// State owned by a single run: the step counter, the history replayed into
/// each prompt, the trajectory and the finished steps.
///
/// A fresh context is built at the start of every run and handed through the
/// loop, so runs never share it.
#[derive(Debug, Default)]
pub struct RunContext {
    step: usize,
    history: Vec<String>,
    trajectory: Trajectory,
    steps: Vec<StepOutcome>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the counter and returns the new 1-based step index.
    pub fn next_step(&mut self) -> usize {
        self.step += 1;
        self.step
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// History lines as they appear in the prompt.
    pub fn history(&self) -> String {
        self.history.join("\n")
    }

    /// Appends an action and its observation to the prompt history and
    /// mirrors both into the trajectory.
    pub fn record_exchange(&mut self, action: &str, observation: &str) {
        self.history.push(format!("Action: {}", action));
        self.history.push(format!("Observation: {}", observation));
        self.trajectory.add_record(RecordKind::Execution, action);
        self.trajectory.add_record(RecordKind::Reflection, observation);
    }

    pub fn push_step(&mut self, outcome: StepOutcome) {
        self.steps.push(outcome);
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn into_parts(self) -> (Vec<StepOutcome>, Trajectory) {
        (self.steps, self.trajectory)
    }
}
