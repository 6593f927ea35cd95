//! Ordered registry of pattern demos.

use std::collections::HashMap;
use std::sync::Arc;

use crate::demo::PatternDemo;

use super::traits::Registry;
use super::{suggest_names, RegistryError};

/// Ordered mapping from demo name to [`PatternDemo`].
///
/// Insertion order is kept for listing and batch runs. Names are unique:
/// registering a second demo under an existing name fails and leaves the
/// registry untouched.
#[derive(Debug, Clone, Default)]
pub struct DemoRegistry {
    demos: Vec<Arc<dyn PatternDemo>>,
    index: HashMap<String, usize>,
}

impl DemoRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { demos: Vec::new(), index: HashMap::new() }
    }

    /// Register a demo by value.
    pub fn register<D: PatternDemo + 'static>(&mut self, demo: D) -> Result<(), RegistryError> {
        self.register_shared(Arc::new(demo))
    }

    /// Register an already shared demo.
    ///
    /// The same `Arc` is handed back by [`get`](Self::get), so callers can
    /// compare identity with `Arc::ptr_eq`.
    pub fn register_shared(&mut self, demo: Arc<dyn PatternDemo>) -> Result<(), RegistryError> {
        let name = demo.name().to_string();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.index.insert(name, self.demos.len());
        self.demos.push(demo);
        Ok(())
    }

    /// Get the demo registered under `name`.
    ///
    /// Fails with [`RegistryError::NotFound`], carrying close matches, when
    /// no such demo exists.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn PatternDemo>, RegistryError> {
        self.lookup(name).ok_or_else(|| RegistryError::NotFound {
            name: name.to_string(),
            suggestions: suggest_names::<Arc<dyn PatternDemo>, _>(self, name),
        })
    }

    /// Lazily iterate registered names in insertion order.
    ///
    /// Each call starts a fresh pass, and the returned iterator is `Clone`,
    /// so the sequence can be replayed.
    pub fn list_names(&self) -> Names<'_> {
        Names { inner: self.demos.iter() }
    }

    /// Iterate registered demos in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn PatternDemo>> {
        self.demos.iter()
    }

    /// Number of registered demos.
    pub fn len(&self) -> usize {
        self.demos.len()
    }

    /// Whether no demos are registered.
    pub fn is_empty(&self) -> bool {
        self.demos.is_empty()
    }

    /// Check whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Build a sub-registry for a batch run.
    ///
    /// If `include` is non-empty only those names are kept; anything in
    /// `exclude` is dropped. Registry order is preserved either way. Every
    /// name in either list must exist.
    pub fn select(&self, include: &[String], exclude: &[String]) -> Result<Self, RegistryError> {
        for name in include.iter().chain(exclude) {
            self.get(name)?;
        }

        let mut selected = Self::new();
        for demo in &self.demos {
            let name = demo.name();
            let included = include.is_empty() || include.iter().any(|n| n == name);
            let excluded = exclude.iter().any(|n| n == name);
            if included && !excluded {
                selected.register_shared(Arc::clone(demo))?;
            }
        }
        Ok(selected)
    }

    fn lookup(&self, name: &str) -> Option<&Arc<dyn PatternDemo>> {
        self.index.get(name).and_then(|&position| self.demos.get(position))
    }
}

impl Registry<Arc<dyn PatternDemo>> for DemoRegistry {
    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn lookup(&self, name: &str) -> Option<&Arc<dyn PatternDemo>> {
        DemoRegistry::lookup(self, name)
    }

    fn len(&self) -> usize {
        self.demos.len()
    }

    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.list_names())
    }
}

/// Iterator over registered names, see [`DemoRegistry::list_names`].
#[derive(Debug, Clone)]
pub struct Names<'a> {
    inner: std::slice::Iter<'a, Arc<dyn PatternDemo>>,
}

impl<'a> Iterator for Names<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|demo| demo.name())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Names<'_> {}
