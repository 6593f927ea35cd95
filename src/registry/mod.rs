//! Registry of runnable pattern demos.
//!
//! This module provides:
//! - A `Registry` trait for read-only, name-keyed lookups
//! - `DemoRegistry`, the ordered, duplicate-rejecting demo directory
//! - `SharedRegistry` for registering from several threads
//! - `RegistryError` for duplicate names and failed lookups

mod demos;
mod shared;
mod traits;

use thiserror::Error;

use crate::suggest::{closest, MAX_SUGGESTION_DISTANCE};

pub use demos::{DemoRegistry, Names};
pub use shared::SharedRegistry;
pub use traits::Registry;

/// Error from registering or looking up a demo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A demo with this name is already registered
    #[error("Demo '{0}' is already registered")]
    DuplicateName(String),
    /// No demo with this name exists
    #[error("Unknown demo '{name}'")]
    NotFound {
        /// The requested name
        name: String,
        /// Registered names close to the requested one
        suggestions: Vec<String>,
    },
}

impl RegistryError {
    /// The demo name the error refers to.
    pub fn name(&self) -> &str {
        match self {
            RegistryError::DuplicateName(name) => name,
            RegistryError::NotFound { name, .. } => name,
        }
    }
}

/// Names in `registry` that look like typos of `query`.
pub fn suggest_names<V, R>(registry: &R, query: &str) -> Vec<String>
where
    V: ?Sized,
    R: Registry<V> + ?Sized,
{
    closest(query, registry.names(), MAX_SUGGESTION_DISTANCE)
}
