//! The demo contract shared by every catalog entry.
//!
//! A [`PatternDemo`] is a named, described unit of runnable example logic.
//! It is constructed once at registration time and never mutated afterwards,
//! so `run` takes `&self` and builds all of its objects fresh on each call.

use std::fmt;
use thiserror::Error;

use crate::output::OutputSink;

/// Failure raised from inside a demo's `run`.
///
/// Pattern-level errors convert into this with `?` through
/// [`DemoError::from_error`] or the blanket `From` impls on each pattern
/// module's error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DemoError {
    message: String,
    /// Display of the underlying cause, if the failure wrapped another error
    cause: Option<String>,
}

impl DemoError {
    /// Create an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), cause: None }
    }

    /// Wrap any error, keeping its display text as both message and cause.
    pub fn from_error<E: std::error::Error>(err: E) -> Self {
        let text = err.to_string();
        Self { message: text.clone(), cause: Some(text) }
    }

    /// Attach a cause description to an existing error.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// The user-visible failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

/// A runnable illustration of a single design pattern.
///
/// Implementations must be `Send + Sync` so a registry snapshot can be handed
/// to another thread; the objects a demo builds inside `run` need not be.
pub trait PatternDemo: Send + Sync {
    /// Unique registry key, e.g. `"adapter"`.
    fn name(&self) -> &str;

    /// One-line human readable description.
    fn description(&self) -> &str;

    /// Execute the demo, writing each logical line to `out` in reading order.
    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError>;
}

impl fmt::Debug for dyn PatternDemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternDemo")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

type DemoFn = dyn Fn(&mut dyn OutputSink) -> Result<(), DemoError> + Send + Sync;

/// A demo backed by a closure.
///
/// Handy for ad-hoc registrations and for tests that need a demo with
/// specific behavior (always failing, panicking, emitting fixed lines).
pub struct FnDemo {
    name: String,
    description: String,
    body: Box<DemoFn>,
}

impl FnDemo {
    /// Create a closure-backed demo.
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut dyn OutputSink) -> Result<(), DemoError> + Send + Sync + 'static,
    {
        Self { name: name.into(), description: description.into(), body: Box::new(body) }
    }

    /// Demo that emits `lines` verbatim and succeeds.
    pub fn lines(name: impl Into<String>, lines: Vec<String>) -> Self {
        let name = name.into();
        let description = format!("Emits {} fixed line(s)", lines.len());
        Self::new(name, description, move |out| {
            for line in &lines {
                out.emit(line.clone());
            }
            Ok(())
        })
    }

    /// Demo that always fails with `message` without emitting anything.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(name, "Always fails", move |_| Err(DemoError::new(message.clone())))
    }
}

impl fmt::Debug for FnDemo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDemo")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

impl PatternDemo for FnDemo {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        (self.body)(out)
    }
}
