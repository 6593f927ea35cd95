//! Observer: a subject pushes state changes to attached observers.
//!
//! Observers write to the sink they are handed, so control flow (who gets
//! notified) can be tested separately from printed text.

use std::rc::Rc;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Receives change notifications from a [`Core`].
pub trait Observer {
    fn update(&self, subject: &Core, out: &mut dyn OutputSink);
}

fn same_observer(a: &Rc<dyn Observer>, b: &Rc<dyn Observer>) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units.
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Observed reactor core with a temperature.
pub struct Core {
    name: String,
    temp: i32,
    observers: Vec<Rc<dyn Observer>>,
}

impl Core {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), temp: 0, observers: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn temp(&self) -> i32 {
        self.temp
    }

    /// Attach an observer. Attaching the same observer twice is a no-op.
    pub fn attach(&mut self, observer: Rc<dyn Observer>) {
        if !self.observers.iter().any(|o| same_observer(o, &observer)) {
            self.observers.push(observer);
        }
    }

    /// Detach an observer, returning whether it was attached.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) -> bool {
        let before = self.observers.len();
        self.observers.retain(|o| !same_observer(o, observer));
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Call `update` on every attached observer except `modifier`.
    pub fn notify(&self, modifier: Option<&Rc<dyn Observer>>, out: &mut dyn OutputSink) {
        for observer in &self.observers {
            if modifier.is_some_and(|m| same_observer(m, observer)) {
                continue;
            }
            observer.update(self, out);
        }
    }

    /// Change the temperature and notify everyone.
    pub fn set_temp(&mut self, temp: i32, out: &mut dyn OutputSink) {
        self.temp = temp;
        self.notify(None, out);
    }
}

#[derive(Debug, Default)]
pub struct TempViewer;

impl Observer for TempViewer {
    fn update(&self, subject: &Core, out: &mut dyn OutputSink) {
        out.emit(format!(
            "Temperature Viewer: {} has Temperature {}",
            subject.name(),
            subject.temp()
        ));
    }
}

#[derive(Debug, Default)]
pub struct ObserverDemo;

impl PatternDemo for ObserverDemo {
    fn name(&self) -> &str {
        "observer"
    }

    fn description(&self) -> &str {
        "Observer: temperature viewers notified whenever a Core changes"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let mut core = Core::new("Core 1");
        core.attach(Rc::new(TempViewer));
        core.attach(Rc::new(TempViewer));

        core.set_temp(80, out);
        core.set_temp(90, out);
        Ok(())
    }
}
