//! Registry handle for concurrent registration.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::demo::PatternDemo;

use super::{DemoRegistry, RegistryError};

/// Cloneable handle that serializes registration behind a mutex.
///
/// Runs never hold the lock: [`snapshot`](Self::snapshot) copies the current
/// entries (cheap `Arc` clones) and the runner works on that copy.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<DemoRegistry>>,
}

impl SharedRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: DemoRegistry) -> Self {
        Self { inner: Arc::new(Mutex::new(registry)) }
    }

    /// Register a demo; the lock is held only for the insertion.
    pub fn register<D: PatternDemo + 'static>(&self, demo: D) -> Result<(), RegistryError> {
        self.lock().register(demo)
    }

    /// Register an already shared demo.
    pub fn register_shared(&self, demo: Arc<dyn PatternDemo>) -> Result<(), RegistryError> {
        self.lock().register_shared(demo)
    }

    /// Point-in-time copy of the registry for running.
    pub fn snapshot(&self) -> DemoRegistry {
        self.lock().clone()
    }

    /// Number of demos registered so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is registered yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, DemoRegistry> {
        // A panic while holding the guard cannot leave a half-inserted entry:
        // register_shared checks before it mutates.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::FnDemo;
    use std::thread;

    #[test]
    fn test_concurrent_registration() {
        let shared = SharedRegistry::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared.register(FnDemo::lines(format!("demo-{}", i), vec![])).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 8);
        let snapshot = shared.snapshot();
        for i in 0..8 {
            assert!(snapshot.contains(&format!("demo-{}", i)));
        }
    }

    #[test]
    fn test_concurrent_duplicates_only_one_wins() {
        let shared = SharedRegistry::new();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.register(FnDemo::lines("same", vec![])).is_ok())
            })
            .collect();
        let wins = handles.into_iter().map(|h| h.join().unwrap()).filter(|ok| *ok).count();

        assert_eq!(wins, 1);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedRegistry::new();
        shared.register(FnDemo::lines("first", vec![])).unwrap();

        let snapshot = shared.snapshot();
        shared.register(FnDemo::lines("second", vec![])).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(shared.len(), 2);
    }
}
