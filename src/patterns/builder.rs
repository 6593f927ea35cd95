//! Builder: a director runs a fixed sequence of steps against a builder.

use std::fmt;
use thiserror::Error;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Errors from driving a builder out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BuilderError {
    /// A part was added, or the product requested, before `create_new_car`
    #[error("No car under construction")]
    NotStarted,
}

impl From<BuilderError> for DemoError {
    fn from(err: BuilderError) -> Self {
        DemoError::from_error(err)
    }
}

/// The product. Parts stay `None` until a builder fills them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Car {
    pub model: Option<String>,
    pub tires: Option<String>,
    pub engine: Option<String>,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |p: &Option<String>| p.clone().unwrap_or_else(|| "None".to_string());
        write!(f, "{} | {} | {}", part(&self.model), part(&self.tires), part(&self.engine))
    }
}

/// Construction steps a director can call.
pub trait CarBuilder {
    fn create_new_car(&mut self);
    fn add_model(&mut self) -> Result<(), BuilderError>;
    fn add_tires(&mut self) -> Result<(), BuilderError>;
    fn add_engine(&mut self) -> Result<(), BuilderError>;
    fn car(&self) -> Option<&Car>;
}

#[derive(Debug, Default)]
pub struct SkyLarkBuilder {
    car: Option<Car>,
}

impl SkyLarkBuilder {
    pub fn new() -> Self {
        Self { car: None }
    }

    fn car_mut(&mut self) -> Result<&mut Car, BuilderError> {
        self.car.as_mut().ok_or(BuilderError::NotStarted)
    }
}

impl CarBuilder for SkyLarkBuilder {
    fn create_new_car(&mut self) {
        self.car = Some(Car::default());
    }

    fn add_model(&mut self) -> Result<(), BuilderError> {
        self.car_mut()?.model = Some("Skylark".to_string());
        Ok(())
    }

    fn add_tires(&mut self) -> Result<(), BuilderError> {
        self.car_mut()?.tires = Some("Regular tires".to_string());
        Ok(())
    }

    fn add_engine(&mut self) -> Result<(), BuilderError> {
        self.car_mut()?.engine = Some("Turbo engine".to_string());
        Ok(())
    }

    fn car(&self) -> Option<&Car> {
        self.car.as_ref()
    }
}

/// Owns the construction order.
pub struct Director<B: CarBuilder> {
    builder: B,
}

impl<B: CarBuilder> Director<B> {
    pub fn new(builder: B) -> Self {
        Self { builder }
    }

    pub fn construct_car(&mut self) -> Result<(), BuilderError> {
        self.builder.create_new_car();
        self.builder.add_model()?;
        self.builder.add_tires()?;
        self.builder.add_engine()?;
        Ok(())
    }

    pub fn get_car(&self) -> Result<&Car, BuilderError> {
        self.builder.car().ok_or(BuilderError::NotStarted)
    }
}

#[derive(Debug, Default)]
pub struct BuilderDemo;

impl PatternDemo for BuilderDemo {
    fn name(&self) -> &str {
        "builder"
    }

    fn description(&self) -> &str {
        "Builder: a Director assembles a Car step by step through a SkyLarkBuilder"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let mut director = Director::new(SkyLarkBuilder::new());
        director.construct_car()?;
        out.emit(director.get_car()?.to_string());
        Ok(())
    }
}
