//! Bridge: the shape abstraction varies independently of its drawing backend.

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Implementation side of the bridge.
pub trait DrawingApi {
    fn draw_circle(&self, x: f64, y: f64, radius: f64) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DrawingApiOne;

impl DrawingApi for DrawingApiOne {
    fn draw_circle(&self, x: f64, y: f64, radius: f64) -> String {
        format!("API 1 drawing a circle at ({}, {} with radius {}!)", x, y, radius)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DrawingApiTwo;

impl DrawingApi for DrawingApiTwo {
    fn draw_circle(&self, x: f64, y: f64, radius: f64) -> String {
        format!("API 2 drawing a circle at ({}, {} with radius {}!)", x, y, radius)
    }
}

/// Abstraction side: knows its geometry, delegates rendering.
pub struct Circle {
    x: f64,
    y: f64,
    radius: f64,
    api: Box<dyn DrawingApi>,
}

impl Circle {
    pub fn new(x: f64, y: f64, radius: f64, api: Box<dyn DrawingApi>) -> Self {
        Self { x, y, radius, api }
    }

    pub fn draw(&self) -> String {
        self.api.draw_circle(self.x, self.y, self.radius)
    }

    /// Multiply the radius by `percent`. Independent of the backend.
    pub fn scale(&mut self, percent: f64) {
        self.radius *= percent;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

#[derive(Debug, Default)]
pub struct BridgeDemo;

impl PatternDemo for BridgeDemo {
    fn name(&self) -> &str {
        "bridge"
    }

    fn description(&self) -> &str {
        "Bridge: one Circle abstraction drawn through two interchangeable APIs"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let circles = [
            Circle::new(1.0, 2.0, 3.0, Box::new(DrawingApiOne)),
            Circle::new(2.0, 3.0, 4.0, Box::new(DrawingApiTwo)),
        ];
        for circle in &circles {
            out.emit(circle.draw());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_delegates_to_api() {
        let one = Circle::new(1.0, 2.0, 3.0, Box::new(DrawingApiOne));
        let two = Circle::new(1.0, 2.0, 3.0, Box::new(DrawingApiTwo));
        assert!(one.draw().starts_with("API 1"));
        assert!(two.draw().starts_with("API 2"));
    }

    #[test]
    fn test_scale_changes_radius_only() {
        let mut circle = Circle::new(5.0, 7.0, 2.0, Box::new(DrawingApiOne));
        circle.scale(2.5);
        assert_eq!(circle.radius(), 5.0);
        assert_eq!(circle.draw(), "API 1 drawing a circle at (5, 7 with radius 5!)");
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        BridgeDemo.run(&mut out).unwrap();
        assert_eq!(
            out,
            vec![
                "API 1 drawing a circle at (1, 2 with radius 3!)",
                "API 2 drawing a circle at (2, 3 with radius 4!)",
            ]
        );
    }
}
