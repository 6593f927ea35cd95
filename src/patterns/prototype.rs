//! Prototype: new objects are cloned from registered exemplars.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PrototypeError {
    #[error("No prototype registered as '{0}'")]
    NotRegistered(String),
}

impl From<PrototypeError> for DemoError {
    fn from(err: PrototypeError) -> Self {
        DemoError::from_error(err)
    }
}

/// Named exemplars of `T`, cloned on request.
#[derive(Debug, Clone)]
pub struct PrototypeRegistry<T: Clone> {
    objects: HashMap<String, T>,
}

impl<T: Clone> Default for PrototypeRegistry<T> {
    fn default() -> Self {
        Self { objects: HashMap::new() }
    }
}

impl<T: Clone> PrototypeRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exemplar, replacing any previous one under `name`.
    pub fn register_object(&mut self, name: impl Into<String>, object: T) {
        self.objects.insert(name.into(), object);
    }

    pub fn unregister_object(&mut self, name: &str) -> Result<T, PrototypeError> {
        self.objects
            .remove(name)
            .ok_or_else(|| PrototypeError::NotRegistered(name.to_string()))
    }

    pub fn clone_object(&self, name: &str) -> Result<T, PrototypeError> {
        self.objects
            .get(name)
            .cloned()
            .ok_or_else(|| PrototypeError::NotRegistered(name.to_string()))
    }

    /// Clone `name` and apply `overrides` to the copy only.
    pub fn clone_with<F>(&self, name: &str, overrides: F) -> Result<T, PrototypeError>
    where
        F: FnOnce(&mut T),
    {
        let mut object = self.clone_object(name)?;
        overrides(&mut object);
        Ok(object)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub name: String,
    pub color: String,
    pub options: String,
}

impl Default for Car {
    fn default() -> Self {
        Self {
            name: "Skylark".to_string(),
            color: "Red".to_string(),
            options: "Ex".to_string(),
        }
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.name, self.color, self.options)
    }
}

#[derive(Debug, Default)]
pub struct PrototypeDemo;

impl PatternDemo for PrototypeDemo {
    fn name(&self) -> &str {
        "prototype"
    }

    fn description(&self) -> &str {
        "Prototype: clone a registered Car instead of constructing a new one"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let mut prototypes = PrototypeRegistry::new();
        prototypes.register_object("skylark", Car::default());
        let car = prototypes.clone_object("skylark")?;
        out.emit(car.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_with_overrides_leaves_exemplar() {
        let mut prototypes = PrototypeRegistry::new();
        prototypes.register_object("skylark", Car::default());

        let blue = prototypes.clone_with("skylark", |car| car.color = "Blue".to_string()).unwrap();
        assert_eq!(blue.to_string(), "Skylark | Blue | Ex");
        assert_eq!(prototypes.clone_object("skylark").unwrap().color, "Red");
    }

    #[test]
    fn test_unregistered_name() {
        let mut prototypes: PrototypeRegistry<Car> = PrototypeRegistry::new();
        assert_eq!(
            prototypes.clone_object("ghost"),
            Err(PrototypeError::NotRegistered("ghost".to_string()))
        );
        assert!(prototypes.unregister_object("ghost").is_err());
    }

    #[test]
    fn test_unregister_then_clone_fails() {
        let mut prototypes = PrototypeRegistry::new();
        prototypes.register_object("skylark", Car::default());
        assert!(prototypes.unregister_object("skylark").is_ok());
        assert!(prototypes.clone_object("skylark").is_err());
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        PrototypeDemo.run(&mut out).unwrap();
        assert_eq!(out, vec!["Skylark | Red | Ex"]);
    }
}
