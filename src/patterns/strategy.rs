//! Strategy: behavior held as a function value chosen at construction.

use std::fmt;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

type StrategyFn = Box<dyn Fn(&Strategy) -> String>;

pub struct Strategy {
    name: String,
    function: StrategyFn,
}

impl Strategy {
    /// Strategy using the default behavior.
    pub fn new() -> Self {
        Self::with_function(default_execute)
    }

    pub fn with_function<F>(function: F) -> Self
    where
        F: Fn(&Strategy) -> String + 'static,
    {
        Self { name: "Default Strategy".to_string(), function: Box::new(function) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn execute(&self) -> String {
        (self.function)(self)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish_non_exhaustive()
    }
}

pub fn default_execute(strategy: &Strategy) -> String {
    format!("{} is used!", strategy.name())
}

pub fn strategy_one(strategy: &Strategy) -> String {
    format!("{} is used to execute method 1", strategy.name())
}

pub fn strategy_two(strategy: &Strategy) -> String {
    format!("{} is used to execute method 2", strategy.name())
}

#[derive(Debug, Default)]
pub struct StrategyDemo;

impl PatternDemo for StrategyDemo {
    fn name(&self) -> &str {
        "strategy"
    }

    fn description(&self) -> &str {
        "Strategy: swap the execute() behavior by passing a function at construction"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let s0 = Strategy::new();
        out.emit(s0.execute());

        let mut s1 = Strategy::with_function(strategy_one);
        s1.set_name("Strategy One");
        out.emit(s1.execute());

        let mut s2 = Strategy::with_function(strategy_two);
        s2.set_name("Strategy Two");
        out.emit(s2.execute());
        Ok(())
    }
}
