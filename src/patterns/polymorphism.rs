//! Polymorphism: overriding through trait methods, overloading through
//! argument types.

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

pub trait Animal {
    fn speak(&self) -> &'static str {
        "Animal speaks"
    }
}

/// Keeps the default `speak`.
#[derive(Debug, Default)]
pub struct GenericAnimal;

impl Animal for GenericAnimal {}

#[derive(Debug, Default)]
pub struct Dog;

impl Animal for Dog {
    fn speak(&self) -> &'static str {
        "Dog barks"
    }
}

#[derive(Debug, Default)]
pub struct Cat;

impl Animal for Cat {
    fn speak(&self) -> &'static str {
        "Cat meows"
    }
}

/// Argument packs accepted by [`MathOperations::add`].
pub trait Operands {
    fn sum(self) -> i64;
}

impl Operands for (i64, i64) {
    fn sum(self) -> i64 {
        self.0 + self.1
    }
}

impl Operands for (i64, i64, i64) {
    fn sum(self) -> i64 {
        self.0 + self.1 + self.2
    }
}

#[derive(Debug, Default)]
pub struct MathOperations;

impl MathOperations {
    /// One name, several arities.
    pub fn add<O: Operands>(&self, operands: O) -> i64 {
        operands.sum()
    }

    pub fn add3(&self, a: i64, b: i64, c: i64) -> i64 {
        self.add((a, b, c))
    }
}

#[derive(Debug, Default)]
pub struct PolymorphismDemo;

impl PatternDemo for PolymorphismDemo {
    fn name(&self) -> &str {
        "polymorphism"
    }

    fn description(&self) -> &str {
        "Polymorphism: overridden speak() on animals and an overloaded add()"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let animals: [&dyn Animal; 2] = [&Dog, &Cat];
        for animal in animals {
            out.emit(animal.speak().to_string());
        }
        out.emit(MathOperations.add3(2, 3, 5).to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speak() {
        assert_eq!(GenericAnimal.speak(), "Animal speaks");
        assert_eq!(Dog.speak(), "Dog barks");
    }

    #[test]
    fn test_add_arities() {
        let math = MathOperations;
        assert_eq!(math.add((2, 3)), 5);
        assert_eq!(math.add((2, 3, 5)), 10);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        PolymorphismDemo.run(&mut out).unwrap();
        assert_eq!(out, vec!["Dog barks", "Cat meows", "10"]);
    }
}
