//! Composite: leaves and containers share one interface in a tree.

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// Node of a menu tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Child(String),
    Composite { name: String, children: Vec<MenuItem> },
}

impl MenuItem {
    pub fn child(name: impl Into<String>) -> Self {
        MenuItem::Child(name.into())
    }

    pub fn composite(name: impl Into<String>) -> Self {
        MenuItem::Composite { name: name.into(), children: Vec::new() }
    }

    pub fn name(&self) -> &str {
        match self {
            MenuItem::Child(name) | MenuItem::Composite { name, .. } => name,
        }
    }

    /// Add a child. Returns `false` on a leaf, which cannot hold children.
    pub fn append_child(&mut self, item: MenuItem) -> bool {
        match self {
            MenuItem::Composite { children, .. } => {
                children.push(item);
                true
            }
            MenuItem::Child(_) => false,
        }
    }

    /// Remove the first direct child with `name`.
    pub fn remove_child(&mut self, name: &str) -> Option<MenuItem> {
        match self {
            MenuItem::Composite { children, .. } => {
                let position = children.iter().position(|c| c.name() == name)?;
                Some(children.remove(position))
            }
            MenuItem::Child(_) => None,
        }
    }

    /// Depth-first, pre-order list of names.
    pub fn component_function(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect(&mut names);
        names
    }

    fn collect(&self, names: &mut Vec<String>) {
        names.push(self.name().to_string());
        if let MenuItem::Composite { children, .. } = self {
            for child in children {
                child.collect(names);
            }
        }
    }
}

pub trait Graphic {
    fn draw(&self) -> String;
}

#[derive(Debug, Default)]
pub struct Circle;

impl Graphic for Circle {
    fn draw(&self) -> String {
        "Drawing a circle".to_string()
    }
}

#[derive(Debug, Default)]
pub struct Square;

impl Graphic for Square {
    fn draw(&self) -> String {
        "Drawing a square".to_string()
    }
}

/// A graphic made of other graphics, drawn in insertion order.
#[derive(Default)]
pub struct CompositeGraphic {
    graphics: Vec<Box<dyn Graphic>>,
}

impl CompositeGraphic {
    pub fn new() -> Self {
        Self { graphics: Vec::new() }
    }

    pub fn add(&mut self, graphic: Box<dyn Graphic>) {
        self.graphics.push(graphic);
    }

    /// Remove by position, returning the removed graphic.
    pub fn remove(&mut self, index: usize) -> Option<Box<dyn Graphic>> {
        (index < self.graphics.len()).then(|| self.graphics.remove(index))
    }

    pub fn len(&self) -> usize {
        self.graphics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphics.is_empty()
    }

    pub fn draw_all(&self) -> Vec<String> {
        self.graphics.iter().map(|g| g.draw()).collect()
    }
}

#[derive(Debug, Default)]
pub struct CompositeDemo;

impl PatternDemo for CompositeDemo {
    fn name(&self) -> &str {
        "composite"
    }

    fn description(&self) -> &str {
        "Composite: a menu tree and a composite graphic treated like their leaves"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let mut sub1 = MenuItem::composite("submenu1");
        sub1.append_child(MenuItem::child("sub_submenu 11"));
        sub1.append_child(MenuItem::child("sub_submenu 12"));

        let mut top = MenuItem::composite("top_menu");
        top.append_child(sub1);
        top.append_child(MenuItem::child("submenu2"));

        for name in top.component_function() {
            out.emit(name);
        }

        let mut composite = CompositeGraphic::new();
        composite.add(Box::new(Circle));
        composite.add(Box::new(Square));
        for line in composite.draw_all() {
            out.emit(line);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_rejects_children() {
        let mut leaf = MenuItem::child("leaf");
        assert!(!leaf.append_child(MenuItem::child("x")));
        assert_eq!(leaf.component_function(), vec!["leaf"]);
    }

    #[test]
    fn test_remove_child() {
        let mut menu = MenuItem::composite("menu");
        menu.append_child(MenuItem::child("a"));
        menu.append_child(MenuItem::child("b"));
        assert_eq!(menu.remove_child("a"), Some(MenuItem::child("a")));
        assert_eq!(menu.remove_child("missing"), None);
        assert_eq!(menu.component_function(), vec!["menu", "b"]);
    }

    #[test]
    fn test_composite_graphic_remove() {
        let mut composite = CompositeGraphic::new();
        composite.add(Box::new(Circle));
        composite.add(Box::new(Square));
        assert!(composite.remove(0).is_some());
        assert!(composite.remove(5).is_none());
        assert_eq!(composite.draw_all(), vec!["Drawing a square"]);
    }

    #[test]
    fn test_demo_output() {
        let mut out: Vec<String> = Vec::new();
        CompositeDemo.run(&mut out).unwrap();
        assert_eq!(
            out,
            vec![
                "top_menu",
                "submenu1",
                "sub_submenu 11",
                "sub_submenu 12",
                "submenu2",
                "Drawing a circle",
                "Drawing a square",
            ]
        );
    }
}
