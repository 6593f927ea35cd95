//! Decorator: wrap a function or an object to extend it without changing it.

use crate::demo::{DemoError, PatternDemo};
use crate::output::OutputSink;

/// A function value carrying its own name and doc text.
pub struct NamedFn {
    name: &'static str,
    doc: &'static str,
    body: Box<dyn Fn() -> String>,
}

impl NamedFn {
    pub fn new<F>(name: &'static str, doc: &'static str, body: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Self { name, doc, body: Box::new(body) }
    }

    pub fn call(&self) -> String {
        (self.body)()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn doc(&self) -> &'static str {
        self.doc
    }
}

/// Wrap the result in `<blink>` tags, keeping the wrapped name and doc.
pub fn make_blink(function: NamedFn) -> NamedFn {
    let NamedFn { name, doc, body } = function;
    NamedFn::new(name, doc, move || format!("<blink>{}</blink>", body()))
}

pub fn hello_world() -> NamedFn {
    make_blink(NamedFn::new("hello_world", "Original function!", || "Hello, World!".to_string()))
}

pub trait Coffee {
    fn cost(&self) -> u32;
}

#[derive(Debug, Default)]
pub struct BasicCoffee;

impl Coffee for BasicCoffee {
    fn cost(&self) -> u32 {
        10
    }
}

macro_rules! topping {
    ($name:ident, $extra:expr) => {
        pub struct $name {
            coffee: Box<dyn Coffee>,
        }

        impl $name {
            pub fn new(coffee: Box<dyn Coffee>) -> Self {
                Self { coffee }
            }
        }

        impl Coffee for $name {
            fn cost(&self) -> u32 {
                self.coffee.cost() + $extra
            }
        }
    };
}

topping!(MilkDecorator, 5);
topping!(SugarDecorator, 2);
topping!(ChocolateDecorator, 3);

#[derive(Debug, Default)]
pub struct DecoratorDemo;

impl PatternDemo for DecoratorDemo {
    fn name(&self) -> &str {
        "decorator"
    }

    fn description(&self) -> &str {
        "Decorator: make_blink wraps a function; toppings wrap a Coffee's cost"
    }

    fn run(&self, out: &mut dyn OutputSink) -> Result<(), DemoError> {
        let hello = hello_world();
        out.emit(hello.call());
        out.emit(hello.name().to_string());
        out.emit(hello.doc().to_string());

        let basic = BasicCoffee;
        out.emit(format!("Cost of Basic Coffee: {}", basic.cost()));
        let milk_sugar = MilkDecorator::new(Box::new(SugarDecorator::new(Box::new(BasicCoffee))));
        out.emit(format!("Cost with Milk and Sugar: {}", milk_sugar.cost()));
        let all = ChocolateDecorator::new(Box::new(milk_sugar));
        out.emit(format!("Cost with All Toppings: {}", all.cost()));
        Ok(())
    }
}
