//! Demo execution.
//!
//! The [`Runner`] looks demos up, runs them against a fresh
//! [`CapturedOutput`], and turns every outcome into a [`RunResult`]. A demo
//! failure (error or panic) is recorded and never propagated, so one broken
//! demo cannot abort a batch. Only lookup failures surface as errors.
//!
//! Runs are synchronous and single-threaded. A batch can be cancelled
//! through a [`CancelToken`]; the token is checked before each demo starts,
//! never while one is running.

pub mod progress;
mod result;

use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Instant;

use crate::demo::{DemoError, PatternDemo};
use crate::output::CapturedOutput;
use crate::registry::{DemoRegistry, RegistryError};

use progress::{NullProgress, ProgressEvent, ProgressReporter};

pub use result::{BatchSummary, RunResult, RunState};

/// Cooperative cancellation flag shared between a runner and its controller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Clear a previous cancellation request.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Executes demos from a registry and reports results.
pub struct Runner {
    reporter: Arc<dyn ProgressReporter>,
    cancel: CancelToken,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner").field("cancel", &self.cancel).finish()
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    /// Create a runner with no progress output.
    pub fn new() -> Self {
        Self { reporter: Arc::new(NullProgress::new()), cancel: CancelToken::new() }
    }

    /// Report progress events to `reporter`.
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Use an externally controlled cancellation token.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The token checked before each demo of a batch.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Run the demo registered under `name`.
    ///
    /// Fails only when the name is unknown; in that case no [`RunResult`]
    /// is produced. A failing demo yields `Ok` with `error` set.
    pub fn run_one(&self, name: &str, registry: &DemoRegistry) -> Result<RunResult, RegistryError> {
        let demo = registry.get(name)?;
        Ok(self.execute(demo.as_ref()))
    }

    /// Run a demo directly, capturing its output and isolating failures.
    pub fn execute(&self, demo: &dyn PatternDemo) -> RunResult {
        let name = demo.name().to_string();
        let mut state = RunState::Pending;

        advance(&mut state, RunState::Running);
        self.reporter.report(ProgressEvent::DemoStarted { demo: name.clone() });

        let started = Instant::now();
        let mut out = CapturedOutput::new();
        let outcome = {
            let _quiet = QuietPanics::enter();
            panic::catch_unwind(AssertUnwindSafe(|| demo.run(&mut out)))
        };
        let duration = started.elapsed();

        let error = match outcome {
            Ok(Ok(())) => None,
            Ok(Err(err)) => Some(err),
            Err(payload) => Some(DemoError::new(format!(
                "demo panicked: {}",
                panic_message(payload.as_ref())
            ))),
        };
        advance(&mut state, if error.is_some() { RunState::Failed } else { RunState::Succeeded });

        self.reporter.report(ProgressEvent::DemoCompleted {
            demo: name.clone(),
            state,
            lines: out.len(),
            error: error.as_ref().map(|e| e.message().to_string()),
            duration_ms: duration.as_millis() as u64,
        });

        match error {
            None => RunResult::succeeded(name, out.into_lines(), duration),
            Some(err) => RunResult::failed(name, out.into_lines(), err, duration),
        }
    }

    /// Lazily run every demo in registry order.
    ///
    /// Nothing runs until the iterator is advanced. Calling `run_all` again
    /// (or cloning an unstarted [`RunAll`]) replays the whole batch.
    pub fn run_all<'a>(&'a self, registry: &'a DemoRegistry) -> RunAll<'a> {
        RunAll { runner: self, pending: registry.iter(), cancelled: false }
    }

    /// Run every demo eagerly and collect a [`BatchSummary`].
    pub fn run_batch(&self, registry: &DemoRegistry) -> BatchSummary {
        self.run_batch_with(registry, |_| {})
    }

    /// Like [`run_batch`](Self::run_batch), calling `on_result` as each demo
    /// finishes so callers can stream output.
    pub fn run_batch_with<F>(&self, registry: &DemoRegistry, mut on_result: F) -> BatchSummary
    where
        F: FnMut(&RunResult),
    {
        let started = Instant::now();
        self.reporter.report(ProgressEvent::BatchStarted { total_demos: registry.len() });

        let mut summary = BatchSummary::new();
        let mut batch = self.run_all(registry);
        for result in batch.by_ref() {
            on_result(&result);
            summary.add_result(result);
        }
        summary.cancelled = batch.was_cancelled();

        let summary = summary.with_duration(started.elapsed());
        self.reporter.report(ProgressEvent::BatchCompleted {
            succeeded: summary.success_count(),
            failed: summary.failed_count(),
            duration_ms: summary.total_duration.as_millis() as u64,
        });
        summary
    }
}

/// Lazy batch run, see [`Runner::run_all`].
#[derive(Clone)]
pub struct RunAll<'a> {
    runner: &'a Runner,
    pending: std::slice::Iter<'a, Arc<dyn PatternDemo>>,
    cancelled: bool,
}

impl RunAll<'_> {
    /// Whether the batch stopped at a cancellation checkpoint.
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Demos not yet started.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl std::fmt::Debug for RunAll<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunAll")
            .field("remaining", &self.pending.len())
            .field("cancelled", &self.cancelled)
            .finish()
    }
}

impl Iterator for RunAll<'_> {
    type Item = RunResult;

    fn next(&mut self) -> Option<RunResult> {
        if self.cancelled || self.pending.len() == 0 {
            return None;
        }
        if self.runner.cancel.is_cancelled() {
            self.cancelled = true;
            self.runner.reporter.report(ProgressEvent::Cancelled { remaining: self.pending.len() });
            return None;
        }
        let demo = self.pending.next()?;
        Some(self.runner.execute(demo.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.pending.len()))
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug_assert!(state.can_transition_to(next), "invalid run transition {} -> {}", state, next);
    *state = next;
}

thread_local! {
    static IN_DEMO: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Suppresses the default panic report on this thread while held.
///
/// The panic is still caught and recorded as the demo's failure, so the
/// stderr report would only duplicate it. Panics outside a demo, or on
/// other threads, reach the previous hook unchanged.
struct QuietPanics {
    previous: bool,
}

impl QuietPanics {
    fn enter() -> Self {
        QUIET_HOOK.call_once(|| {
            let hook = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if !IN_DEMO.with(Cell::get) {
                    hook(info);
                }
            }));
        });
        Self { previous: IN_DEMO.with(|flag| flag.replace(true)) }
    }
}

impl Drop for QuietPanics {
    fn drop(&mut self) {
        IN_DEMO.with(|flag| flag.set(self.previous));
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
