//! Visitor: new operations on a type without editing it, via double dispatch.

use std::fmt;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

pub trait Visitor: fmt::Display {
    fn visit(&self, house: &House) -> String;
}

/// The visited element.
#[derive(Debug, Default)]
pub struct House;

impl House {
    pub fn accept(&self, visitor: &dyn Visitor) -> String {
        visitor.visit(self)
    }

    pub fn work_on_hvac(&self, specialist: &HvacSpecialist) -> String {
        format!("{} worked on by {}", self, specialist)
    }

    pub fn work_on_electricity(&self, electrician: &Electrician) -> String {
        format!("{} worked on by {}", self, electrician)
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("House")
    }
}

#[derive(Debug, Default)]
pub struct HvacSpecialist;

impl Visitor for HvacSpecialist {
    fn visit(&self, house: &House) -> String {
        house.work_on_hvac(self)
    }
}

impl fmt::Display for HvacSpecialist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HvacSpecialist")
    }
}

#[derive(Debug, Default)]
pub struct Electrician;

impl Visitor for Electrician {
    fn visit(&self, house: &House) -> String {
        house.work_on_electricity(self)
    }
}

impl fmt::Display for Electrician {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Electrician")
    }
}

#[derive(Debug, Default)]
pub struct VisitorDemo;

impl PatternDemo for VisitorDemo {
    fn name(&self) -> &str {
        "visitor"
    }

    fn description(&self) -> &str {
        "Visitor: HVAC specialist and electrician each work on a House via accept()"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let home = House;
        let visitors: [&dyn Visitor; 2] = [&HvacSpecialist, &Electrician];
        for visitor in visitors {
            out.emit(home.accept(visitor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Inspector;

    impl fmt::Display for Inspector {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Inspector")
        }
    }

    impl Visitor for Inspector {
        fn visit(&self, house: &House) -> String {
            format!("{} inspected by {}", house, self)
        }
    }

    #[test]
    fn test_new_visitor_without_touching_house() {
        assert_eq!(House.accept(&Inspector), "House inspected by Inspector");
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        VisitorDemo.run(&mut out).unwrap();
        assert_eq!(
            out,
            vec!["House worked on by HvacSpecialist", "House worked on by Electrician"]
        );
    }
}
