//! Proxy: a cheap stand-in that controls access to an expensive object.

use std::thread;
use std::time::Duration;

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// The expensive object behind the proxy.
#[derive(Debug, Default)]
pub struct Producer;

impl Producer {
    pub fn produce(&self) -> &'static str {
        "Producer is working hard!"
    }

    pub fn meet(&self) -> &'static str {
        "Producer has time to meet you now!"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupancy {
    #[default]
    Free,
    Busy,
}

/// Guards access to a [`Producer`], creating it only when it is free.
#[derive(Debug, Default)]
pub struct Proxy {
    pub occupied: Occupancy,
    producer: Option<Producer>,
    delay: Duration,
}

impl Proxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated wait per request. Zero unless set.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn has_producer(&self) -> bool {
        self.producer.is_some()
    }

    pub fn produce(&mut self, out: &mut dyn OutputSink) {
        out.emit("Artist checking if Producer is available ...".to_string());
        self.wait();
        match self.occupied {
            Occupancy::Free => {
                let producer = self.producer.get_or_insert_with(Producer::default);
                out.emit(producer.meet().to_string());
            }
            Occupancy::Busy => out.emit("Producer is busy!".to_string()),
        }
    }

    fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

pub trait ImageViewer {
    fn display_image(&mut self, out: &mut dyn OutputSink);
}

/// Loads its image as soon as it is constructed.
#[derive(Debug)]
pub struct HighResImageViewer {
    image_path: String,
}

impl HighResImageViewer {
    pub fn load(image_path: impl Into<String>, out: &mut dyn OutputSink) -> Self {
        let image_path = image_path.into();
        out.emit(format!("Loading high-resolution image from {}", image_path));
        Self { image_path }
    }
}

impl ImageViewer for HighResImageViewer {
    fn display_image(&mut self, out: &mut dyn OutputSink) {
        out.emit(format!("Displaying high-resolution image from {}", self.image_path));
    }
}

/// Defers the load until the first display, then reuses the viewer.
#[derive(Debug)]
pub struct ProxyImageViewer {
    image_path: String,
    real_viewer: Option<HighResImageViewer>,
}

impl ProxyImageViewer {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self { image_path: image_path.into(), real_viewer: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.real_viewer.is_some()
    }
}

impl ImageViewer for ProxyImageViewer {
    fn display_image(&mut self, out: &mut dyn OutputSink) {
        if self.real_viewer.is_none() {
            self.real_viewer = Some(HighResImageViewer::load(self.image_path.clone(), out));
        }
        if let Some(viewer) = self.real_viewer.as_mut() {
            viewer.display_image(out);
        }
    }
}

#[derive(Debug, Default)]
pub struct ProxyDemo;

impl PatternDemo for ProxyDemo {
    fn name(&self) -> &str {
        "proxy"
    }

    fn description(&self) -> &str {
        "Proxy: gate access to a Producer and lazy-load a high-resolution image"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let mut proxy = Proxy::new();
        proxy.produce(out);
        proxy.occupied = Occupancy::Busy;
        proxy.produce(out);

        let mut viewer = ProxyImageViewer::new("image.jpg");
        viewer.display_image(out);
        viewer.display_image(out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_proxy_never_creates_producer() {
        let mut proxy = Proxy::new();
        proxy.occupied = Occupancy::Busy;
        let mut out = Vec::<String>::new();
        proxy.produce(&mut out);
        assert!(!proxy.has_producer());
        assert_eq!(out.last().map(String::as_str), Some("Producer is busy!"));
    }

    #[test]
    fn test_free_proxy_creates_producer() {
        let mut proxy = Proxy::new();
        proxy.produce(&mut Vec::<String>::new());
        assert!(proxy.has_producer());
    }

    #[test]
    fn test_image_loaded_once() {
        let mut viewer = ProxyImageViewer::new("a.png");
        assert!(!viewer.is_loaded());

        let mut out = Vec::<String>::new();
        viewer.display_image(&mut out);
        viewer.display_image(&mut out);
        viewer.display_image(&mut out);
        assert!(viewer.is_loaded());
        assert_eq!(out.iter().filter(|l| l.starts_with("Loading")).count(), 1);
        assert_eq!(out.iter().filter(|l| l.starts_with("Displaying")).count(), 3);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        ProxyDemo.run(&mut out).unwrap();
        assert_eq!(
            out,
            vec![
                "Artist checking if Producer is available ...",
                "Producer has time to meet you now!",
                "Artist checking if Producer is available ...",
                "Producer is busy!",
                "Loading high-resolution image from image.jpg",
                "Displaying high-resolution image from image.jpg",
                "Displaying high-resolution image from image.jpg",
            ]
        );
    }
}
