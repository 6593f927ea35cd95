//! Singleton: one lazily created instance for the whole process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

static INSTANCE: OnceLock<Singleton> = OnceLock::new();
static CREATED: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
pub struct Singleton {
    _private: (),
}

impl Singleton {
    /// The process-wide instance, created on first call.
    pub fn instance() -> &'static Singleton {
        INSTANCE.get_or_init(|| {
            CREATED.fetch_add(1, Ordering::SeqCst);
            Singleton { _private: () }
        })
    }

    /// How many times the instance has been constructed. Never above one.
    pub fn times_created() -> usize {
        CREATED.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct SingletonDemo;

impl PatternDemo for SingletonDemo {
    fn name(&self) -> &str {
        "singleton"
    }

    fn description(&self) -> &str {
        "Singleton: every request returns the same process-wide instance"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let s1 = Singleton::instance();
        let s2 = Singleton::instance();
        out.emit(std::ptr::eq(s1, s2).to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_access_creates_once() {
        let addresses: Vec<usize> = (0..8)
            .map(|_| thread::spawn(|| Singleton::instance() as *const Singleton as usize))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(Singleton::times_created(), 1);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        SingletonDemo.run(&mut out).unwrap();
        assert_eq!(out, vec!["true"]);
    }
}
