//! Run progress reporting.
//!
//! The runner narrates what it is doing through a [`ProgressReporter`].
//! Demo output never goes here; this is the diagnostic side channel
//! (stderr by default), in console or JSON-lines form.
//!
//! # Example
//!
//! ```
//! use pattern_catalog::runner::progress::{ConsoleProgress, ProgressEvent, ProgressReporter};
//!
//! let reporter = ConsoleProgress::with_output(std::io::sink()).with_verbose(true);
//! reporter.report(ProgressEvent::BatchStarted { total_demos: 2 });
//! reporter.report(ProgressEvent::DemoStarted { demo: "adapter".to_string() });
//! ```

use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::result::RunState;

/// Events reported while running demos.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A batch run is about to start
    BatchStarted {
        /// Number of demos scheduled
        total_demos: usize,
    },
    /// A demo moved to `Running`
    DemoStarted {
        /// Demo name
        demo: String,
    },
    /// A demo reached a terminal state
    DemoCompleted {
        /// Demo name
        demo: String,
        /// `Succeeded` or `Failed`
        state: RunState,
        /// Number of captured output lines
        lines: usize,
        /// Failure message, if any
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        /// Duration in milliseconds
        duration_ms: u64,
    },
    /// The batch stopped at a cancellation checkpoint
    Cancelled {
        /// Demos that were never started
        remaining: usize,
    },
    /// A batch run finished
    BatchCompleted {
        /// Number of demos that succeeded
        succeeded: usize,
        /// Number of demos that failed
        failed: usize,
        /// Total duration in milliseconds
        duration_ms: u64,
    },
}

/// Trait for progress reporters.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event.
    fn report(&self, event: ProgressEvent);

    /// Check if this reporter wants verbose output.
    fn is_verbose(&self) -> bool {
        false
    }
}

/// A progress reporter that discards all events.
#[derive(Debug, Default)]
pub struct NullProgress;

impl NullProgress {
    /// Create a new null progress reporter.
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NullProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Console progress reporter with optional colors.
pub struct ConsoleProgress {
    use_colors: bool,
    verbose: bool,
    /// Demos completed in the current batch
    current: AtomicUsize,
    /// Demos scheduled in the current batch (0 outside a batch)
    total: AtomicUsize,
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for ConsoleProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleProgress")
            .field("use_colors", &self.use_colors)
            .field("verbose", &self.verbose)
            .field("current", &self.current)
            .field("total", &self.total)
            .finish()
    }
}

impl ConsoleProgress {
    /// Create a console reporter writing to stderr.
    pub fn new() -> Self {
        Self::build(Box::new(std::io::stderr()), true)
    }

    /// Create a console reporter that writes to a custom output, without colors.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self::build(Box::new(output), false)
    }

    fn build(output: Box<dyn Write + Send>, use_colors: bool) -> Self {
        Self {
            use_colors,
            verbose: false,
            current: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            output: Mutex::new(output),
        }
    }

    /// Set whether to use colors.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set verbose mode.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if self.use_colors {
            format!("{}{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    fn green(&self, text: &str) -> String {
        self.paint(text, "\x1b[32m")
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(text, "\x1b[33m")
    }

    fn red(&self, text: &str) -> String {
        self.paint(text, "\x1b[31m")
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(text, "\x1b[36m")
    }

    fn writeln(&self, line: &str) {
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", line);
        }
    }

    /// `[3/17] ` inside a batch, empty for a single run.
    fn position(&self) -> String {
        let total = self.total.load(Ordering::SeqCst);
        if total == 0 {
            String::new()
        } else {
            format!("[{}/{}] ", self.current.load(Ordering::SeqCst), total)
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::BatchStarted { total_demos } => {
                self.total.store(total_demos, Ordering::SeqCst);
                self.current.store(0, Ordering::SeqCst);
                self.writeln(&format!(
                    "{} Running {} demo{}...",
                    self.cyan("[run]"),
                    total_demos,
                    if total_demos == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::DemoStarted { demo } => {
                if self.verbose {
                    self.writeln(&format!("{} {}starting {}", self.cyan("[run]"), self.position(), demo));
                }
            }
            ProgressEvent::DemoCompleted { demo, state, lines, error, duration_ms } => {
                if self.total.load(Ordering::SeqCst) > 0 {
                    self.current.fetch_add(1, Ordering::SeqCst);
                }
                let status = match state {
                    RunState::Failed => self.red("FAILED"),
                    _ => self.green("ok"),
                };
                if self.verbose || state == RunState::Failed {
                    self.writeln(&format!(
                        "{} {}{} {} ({} line{}, {})",
                        self.cyan("[run]"),
                        self.position(),
                        status,
                        demo,
                        lines,
                        if lines == 1 { "" } else { "s" },
                        format_duration(duration_ms)
                    ));
                }
                if let Some(err) = error {
                    self.writeln(&format!("        {}", self.red(&err)));
                }
            }
            ProgressEvent::Cancelled { remaining } => {
                self.writeln(&format!(
                    "{} cancelled, {} demo{} not started",
                    self.yellow("[warn]"),
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                ));
            }
            ProgressEvent::BatchCompleted { succeeded, failed, duration_ms } => {
                self.total.store(0, Ordering::SeqCst);
                if failed == 0 {
                    self.writeln(&format!(
                        "{} {} succeeded in {}",
                        self.green("[done]"),
                        succeeded,
                        format_duration(duration_ms)
                    ));
                } else {
                    self.writeln(&format!(
                        "{} {} succeeded, {} {} in {}",
                        self.red("[error]"),
                        succeeded,
                        failed,
                        if failed == 1 { "failure" } else { "failures" },
                        format_duration(duration_ms)
                    ));
                }
            }
        }
    }

    fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// JSON-lines progress reporter for machine-readable output.
pub struct JsonProgress {
    output: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for JsonProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonProgress").finish()
    }
}

impl JsonProgress {
    /// Create a new JSON progress reporter writing to stderr.
    pub fn new() -> Self {
        Self { output: Mutex::new(Box::new(std::io::stderr())) }
    }

    /// Create a JSON progress reporter that writes to a custom output.
    pub fn with_output<W: Write + Send + 'static>(output: W) -> Self {
        Self { output: Mutex::new(Box::new(output)) }
    }
}

impl Default for JsonProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let Ok(json) = serde_json::to_string(&event) else {
            return;
        };
        if let Ok(mut output) = self.output.lock() {
            let _ = writeln!(output, "{}", json);
        }
    }
}

/// Format a duration in milliseconds to a human-readable string.
fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
