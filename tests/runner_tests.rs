//! Library-level scenarios for the registry and runner

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use pattern_catalog::demo::{DemoError, FnDemo, PatternDemo};
use pattern_catalog::patterns::{adapter::AdapterDemo, builtin_registry};
use pattern_catalog::registry::{DemoRegistry, RegistryError, SharedRegistry};
use pattern_catalog::runner::{CancelToken, RunState, Runner};

fn adapter_and_broken() -> DemoRegistry {
    let mut registry = DemoRegistry::new();
    registry
        .register(FnDemo::lines(
            "adapter",
            vec!["Korean says 'An-neyong?'".to_string(), "British says 'Hello!'".to_string()],
        ))
        .unwrap();
    registry.register(FnDemo::failing("broken", "boom")).unwrap();
    registry
}

#[test]
fn test_run_all_adapter_then_broken() {
    let registry = adapter_and_broken();
    let runner = Runner::new();
    let results: Vec<_> = runner.run_all(&registry).collect();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].demo_name, "adapter");
    assert_eq!(results[0].output_lines, vec!["Korean says 'An-neyong?'", "British says 'Hello!'"]);
    assert!(results[0].error.is_none());

    assert_eq!(results[1].demo_name, "broken");
    assert!(results[1].output_lines.is_empty());
    assert_eq!(results[1].error_message(), Some("boom"));
    assert_eq!(results[1].state(), RunState::Failed);
}

#[test]
fn test_run_one_missing_produces_no_result() {
    let registry = adapter_and_broken();
    let err = Runner::new().run_one("missing", &registry).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { ref name, .. } if name == "missing"));
}

#[test]
fn test_failures_never_stop_the_batch() {
    let mut registry = DemoRegistry::new();
    for i in 0..5 {
        let name = format!("demo{}", i);
        if i % 2 == 0 {
            registry.register(FnDemo::failing(name, "nope")).unwrap();
        } else {
            registry
                .register(FnDemo::new(name, "panics", |_| -> Result<(), DemoError> {
                    panic!("kaboom")
                }))
                .unwrap();
        }
    }

    let summary = Runner::new().run_batch(&registry);
    assert_eq!(summary.results.len(), 5);
    assert_eq!(summary.failed_count(), 5);
    assert_eq!(summary.results[1].error_message(), Some("demo panicked: kaboom"));
}

#[test]
fn test_builtin_catalog_runs_clean() {
    let registry = builtin_registry().unwrap();
    let summary = Runner::new().run_batch(&registry);
    assert_eq!(summary.summary(), "17 demos: 17 succeeded, 0 failed");
}

#[test]
fn test_builtin_duplicate_rejected() {
    let mut registry = builtin_registry().unwrap();
    let before: Vec<String> = registry.list_names().map(str::to_string).collect();

    let err = registry.register(AdapterDemo).unwrap_err();
    assert_eq!(err, RegistryError::DuplicateName("adapter".to_string()));

    let after: Vec<String> = registry.list_names().map(str::to_string).collect();
    assert_eq!(before, after);
}

#[test]
fn test_cancel_from_inside_a_demo_stops_before_next() {
    let token = CancelToken::new();
    let runs = Arc::new(AtomicUsize::new(0));

    let mut registry = DemoRegistry::new();
    for name in ["first", "second", "third"] {
        let token = token.clone();
        let runs = Arc::clone(&runs);
        registry
            .register(FnDemo::new(name, "cancels", move |out| {
                runs.fetch_add(1, Ordering::SeqCst);
                out.emit("ran".to_string());
                token.cancel();
                Ok(())
            }))
            .unwrap();
    }

    let runner = Runner::new().with_cancel_token(token);
    let summary = runner.run_batch(&registry);

    // The demo in progress finishes; nothing after it starts
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(summary.cancelled);
    assert_eq!(summary.results.len(), 1);
    assert!(summary.results[0].is_success());
}

#[test]
fn test_shared_registry_snapshot_runs_on_another_thread() {
    let shared = SharedRegistry::new();
    for demo in pattern_catalog::patterns::builtin_demos() {
        shared.register_shared(demo).unwrap();
    }

    let snapshot = shared.snapshot();
    let handle = thread::spawn(move || Runner::new().run_batch(&snapshot).success_count());

    // Registration keeps working while the snapshot runs
    shared.register(FnDemo::lines("late", vec![])).unwrap();
    assert_eq!(handle.join().unwrap(), 17);
    assert_eq!(shared.len(), 18);
}

#[test]
fn test_get_returns_registered_instance() {
    let demo: Arc<dyn PatternDemo> = Arc::new(AdapterDemo);
    let mut registry = DemoRegistry::new();
    registry.register_shared(Arc::clone(&demo)).unwrap();
    assert!(Arc::ptr_eq(registry.get("adapter").unwrap(), &demo));
}
