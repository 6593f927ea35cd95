//! Factory: callers ask for a kind of pet and get a trait object back.

use thiserror::Error;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FactoryError {
    #[error("Unknown pet kind '{0}'")]
    UnknownPet(String),
}

impl From<FactoryError> for DemoError {
    fn from(err: FactoryError) -> Self {
        DemoError::from_error(err)
    }
}

pub trait Pet {
    fn name(&self) -> &str;
    fn speak(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct Dog {
    name: String,
}

impl Dog {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Pet for Dog {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> &'static str {
        "Woof!"
    }
}

#[derive(Debug, Clone)]
pub struct Cat {
    name: String,
}

impl Cat {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Pet for Cat {
    fn name(&self) -> &str {
        &self.name
    }

    fn speak(&self) -> &'static str {
        "Meow!"
    }
}

/// Kinds [`get_pet`] knows how to build.
pub const PET_KINDS: &[&str] = &["dog", "cat"];

/// The factory method.
pub fn get_pet(kind: &str) -> Result<Box<dyn Pet>, FactoryError> {
    match kind {
        "dog" => Ok(Box::new(Dog::new("Hope"))),
        "cat" => Ok(Box::new(Cat::new("Peace"))),
        other => Err(FactoryError::UnknownPet(other.to_string())),
    }
}

#[derive(Debug, Default)]
pub struct FactoryDemo;

impl PatternDemo for FactoryDemo {
    fn name(&self) -> &str {
        "factory"
    }

    fn description(&self) -> &str {
        "Factory: get_pet() builds a Dog or Cat behind a common Pet interface"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        for kind in PET_KINDS {
            out.emit(get_pet(kind)?.speak().to_string());
        }
        Ok(())
    }
}
