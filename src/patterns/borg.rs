//! Borg (monostate): many handles, one state.
//!
//! The state is an explicit [`SharedState`] handed to each `Borg` rather than
//! hidden class-level storage, so two independent groups never mix.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Insertion-ordered key/value map shared by every handle cloned from it.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    entries: Rc<RefCell<Vec<(String, String)>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, keeping the original position on overwrite.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Whether both handles point at the same storage.
    pub fn ptr_eq(&self, other: &SharedState) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Display for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': '{}'", key, value)?;
        }
        write!(f, "}}")
    }
}

/// A handle onto a [`SharedState`].
#[derive(Debug, Clone)]
pub struct Borg {
    state: SharedState,
}

impl Borg {
    /// Join `state`, merging `updates` into it.
    pub fn new(state: &SharedState, updates: &[(&str, &str)]) -> Self {
        for (key, value) in updates {
            state.set(*key, *value);
        }
        Self { state: state.clone() }
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }
}

impl fmt::Display for Borg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct BorgDemo;

impl PatternDemo for BorgDemo {
    fn name(&self) -> &str {
        "borg"
    }

    fn description(&self) -> &str {
        "Borg: separate handles that all read and write one shared state"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let state = SharedState::new();
        let x = Borg::new(&state, &[("HTTP", "Hyper Text Transfer Protocol")]);
        out.emit(x.to_string());
        let y = Borg::new(&state, &[("SNMP", "Simple Network Management Protocol")]);
        out.emit(y.to_string());
        Ok(())
    }
}
