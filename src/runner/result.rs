//! Run result types.
//!
//! Contains types for representing the outcome of demo invocations.

use serde::Serialize;
use std::time::Duration;

use crate::demo::DemoError;

/// Lifecycle of a single demo invocation.
///
/// `Pending -> Running -> {Succeeded, Failed}`. There are no retries; a
/// caller that wants another attempt starts a new invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Scheduled but not started
    Pending,
    /// `run` is executing
    Running,
    /// `run` returned normally
    Succeeded,
    /// `run` returned an error or panicked
    Failed,
}

impl RunState {
    /// Whether this state ends the invocation.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed)
    }

    /// Whether `self -> next` is an allowed transition.
    pub fn can_transition_to(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Pending, RunState::Running)
                | (RunState::Running, RunState::Succeeded)
                | (RunState::Running, RunState::Failed)
        )
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Pending => write!(f, "pending"),
            RunState::Running => write!(f, "running"),
            RunState::Succeeded => write!(f, "succeeded"),
            RunState::Failed => write!(f, "failed"),
        }
    }
}

/// Outcome of running one demo.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Name of the demo that ran
    pub demo_name: String,
    /// Lines emitted before `run` returned, in order
    pub output_lines: Vec<String>,
    /// Failure record, `None` on success
    pub error: Option<DemoError>,
    /// Wall-clock time spent in `run`
    pub duration: Duration,
}

impl RunResult {
    /// Create a successful result.
    pub fn succeeded(demo_name: String, output_lines: Vec<String>, duration: Duration) -> Self {
        Self { demo_name, output_lines, error: None, duration }
    }

    /// Create a failed result, keeping whatever output was emitted first.
    pub fn failed(
        demo_name: String,
        output_lines: Vec<String>,
        error: DemoError,
        duration: Duration,
    ) -> Self {
        Self { demo_name, output_lines, error: Some(error), duration }
    }

    /// Terminal state of this invocation.
    pub fn state(&self) -> RunState {
        if self.error.is_some() {
            RunState::Failed
        } else {
            RunState::Succeeded
        }
    }

    /// Check if this result is successful.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Failure message, if the demo failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(DemoError::message)
    }
}

/// Aggregate of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Results in run order
    pub results: Vec<RunResult>,
    /// Total wall-clock duration
    pub total_duration: Duration,
    /// Whether the batch stopped early on cancellation
    pub cancelled: bool,
}

impl BatchSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a run result.
    pub fn add_result(&mut self, result: RunResult) {
        self.results.push(result);
    }

    /// Set the total duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.total_duration = duration;
        self
    }

    /// Number of demos that succeeded.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of demos that failed.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.success_count()
    }

    /// Whether every demo that ran succeeded.
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// Failed results, in run order.
    pub fn failures(&self) -> Vec<&RunResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    /// One-line summary, e.g. `17 demos: 16 succeeded, 1 failed`.
    pub fn summary(&self) -> String {
        let total = self.results.len();
        let mut line = format!(
            "{} {}: {} succeeded, {} failed",
            total,
            if total == 1 { "demo" } else { "demos" },
            self.success_count(),
            self.failed_count()
        );
        if self.cancelled {
            line.push_str(" (cancelled)");
        }
        line
    }
}
