//! Adapter: make incompatible interfaces usable through one target trait.

use std::ops::Deref;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Anything with a display name.
pub trait Named {
    fn name(&self) -> &str;
}

/// The interface client code expects.
pub trait Speaker: Named {
    fn speak(&self) -> String;
}

/// Korean speaker.
#[derive(Debug, Clone)]
pub struct Korean {
    name: String,
}

impl Korean {
    pub fn new() -> Self {
        Self { name: "Korean".to_string() }
    }

    pub fn speak_korean(&self) -> &'static str {
        "An-neyong?"
    }
}

impl Named for Korean {
    fn name(&self) -> &str {
        &self.name
    }
}

/// English speaker, with a differently named speak method.
#[derive(Debug, Clone)]
pub struct British {
    name: String,
}

impl British {
    pub fn new() -> Self {
        Self { name: "British".to_string() }
    }

    pub fn speak_english(&self) -> &'static str {
        "Hello!"
    }
}

impl Named for British {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Wraps an adaptee and maps the generic `speak` onto one of its methods.
///
/// Everything else on the adaptee stays reachable through `Deref`.
pub struct Adapter<T> {
    object: T,
    speak: fn(&T) -> &'static str,
}

impl<T> Adapter<T> {
    pub fn new(object: T, speak: fn(&T) -> &'static str) -> Self {
        Self { object, speak }
    }
}

impl<T> Deref for Adapter<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.object
    }
}

impl<T: Named> Named for Adapter<T> {
    fn name(&self) -> &str {
        self.object.name()
    }
}

impl<T: Named> Speaker for Adapter<T> {
    fn speak(&self) -> String {
        (self.speak)(&self.object).to_string()
    }
}

/// Target interface for temperature conversion.
pub trait TemperatureConverter {
    fn convert(&self, value: f64) -> f64;
}

/// Adaptee reporting temperatures in Celsius.
#[derive(Debug, Clone, Default)]
pub struct CelsiusTemperature;

impl CelsiusTemperature {
    pub fn get_temperature(&self) -> f64 {
        0.0
    }
}

/// Presents a Celsius source as a Fahrenheit converter.
#[derive(Debug, Clone, Default)]
pub struct CelsiusToFahrenheitAdapter {
    celsius: CelsiusTemperature,
}

impl CelsiusToFahrenheitAdapter {
    pub fn new(celsius: CelsiusTemperature) -> Self {
        Self { celsius }
    }

    /// Current reading of the wrapped source, in Fahrenheit.
    pub fn current(&self) -> f64 {
        self.convert(self.celsius.get_temperature())
    }
}

impl TemperatureConverter for CelsiusToFahrenheitAdapter {
    fn convert(&self, celsius: f64) -> f64 {
        celsius * 9.0 / 5.0 + 32.0
    }
}

#[derive(Debug, Default)]
pub struct AdapterDemo;

impl PatternDemo for AdapterDemo {
    fn name(&self) -> &str {
        "adapter"
    }

    fn description(&self) -> &str {
        "Adapter: unify speak_korean/speak_english behind one speak() interface"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let speakers: Vec<Box<dyn Speaker>> = vec![
            Box::new(Adapter::new(Korean::new(), Korean::speak_korean)),
            Box::new(Adapter::new(British::new(), British::speak_english)),
        ];
        for speaker in &speakers {
            out.emit(format!("{} says '{}'", speaker.name(), speaker.speak()));
        }

        let converter = CelsiusToFahrenheitAdapter::new(CelsiusTemperature);
        let celsius_value = 25.0;
        out.emit(format!(
            "{} Celsius is equal to {:.1} Fahrenheit",
            celsius_value,
            converter.convert(celsius_value)
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_maps_speak() {
        let korean = Adapter::new(Korean::new(), Korean::speak_korean);
        let british = Adapter::new(British::new(), British::speak_english);
        assert_eq!(korean.speak(), "An-neyong?");
        assert_eq!(british.speak(), "Hello!");
    }

    #[test]
    fn test_adapter_passes_through_adaptee() {
        let british = Adapter::new(British::new(), British::speak_english);
        assert_eq!(british.name(), "British");
        // Deref exposes the adaptee's own methods
        assert_eq!(british.speak_english(), "Hello!");
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let converter = CelsiusToFahrenheitAdapter::new(CelsiusTemperature);
        assert_eq!(converter.convert(25.0), 77.0);
        assert_eq!(converter.convert(100.0), 212.0);
        assert_eq!(converter.current(), 32.0);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        AdapterDemo.run(&mut out).unwrap();
        assert_eq!(
            out,
            vec![
                "Korean says 'An-neyong?'",
                "British says 'Hello!'",
                "25 Celsius is equal to 77.0 Fahrenheit",
            ]
        );
    }
}
