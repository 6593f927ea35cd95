//! Common trait for registries that store named items.

/// Read-only view over a registry that maps unique names to values.
///
/// Implemented by [`DemoRegistry`](super::DemoRegistry); generic helpers such
/// as [`suggest_names`](super::suggest_names) work against this trait rather
/// than a concrete registry.
///
/// # Example
///
/// ```
/// use pattern_catalog::demo::FnDemo;
/// use pattern_catalog::registry::{DemoRegistry, Registry};
///
/// let mut registry = DemoRegistry::new();
/// registry.register(FnDemo::lines("hello", vec!["Hello!".to_string()])).unwrap();
///
/// assert!(registry.contains("hello"));
/// assert_eq!(Registry::len(&registry), 1);
/// ```
pub trait Registry<V: ?Sized> {
    /// Check if an item with the given name exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Look up an item by name, `None` if absent.
    fn lookup(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all names, in the registry's natural order.
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}
