//! The built-in catalog of design pattern demos.
//!
//! Each submodule exposes the pattern itself as a small library API plus one
//! [`PatternDemo`] that exercises it.

pub mod adapter;
pub mod borg;
pub mod bridge;
pub mod builder;
pub mod chain;
pub mod composite;
pub mod copying;
pub mod decorator;
pub mod factory;
pub mod iterator;
pub mod observer;
pub mod polymorphism;
pub mod prototype;
pub mod proxy;
pub mod singleton;
pub mod strategy;
pub mod visitor;

use std::sync::Arc;

use crate::demo::PatternDemo;
use crate::registry::{DemoRegistry, RegistryError};

/// Every built-in demo, in catalog order.
pub fn builtin_demos() -> Vec<Arc<dyn PatternDemo>> {
    vec![
        Arc::new(adapter::AdapterDemo),
        Arc::new(bridge::BridgeDemo),
        Arc::new(builder::BuilderDemo),
        Arc::new(chain::ChainDemo),
        Arc::new(composite::CompositeDemo),
        Arc::new(factory::FactoryDemo),
        Arc::new(iterator::IteratorDemo),
        Arc::new(observer::ObserverDemo),
        Arc::new(polymorphism::PolymorphismDemo),
        Arc::new(prototype::PrototypeDemo),
        Arc::new(proxy::ProxyDemo),
        Arc::new(singleton::SingletonDemo),
        Arc::new(borg::BorgDemo),
        Arc::new(strategy::StrategyDemo),
        Arc::new(visitor::VisitorDemo),
        Arc::new(decorator::DecoratorDemo),
        Arc::new(copying::CopyingDemo),
    ]
}

/// A registry holding the whole catalog.
pub fn builtin_registry() -> Result<DemoRegistry, RegistryError> {
    let mut registry = DemoRegistry::new();
    for demo in builtin_demos() {
        registry.register_shared(demo)?;
    }
    Ok(registry)
}
