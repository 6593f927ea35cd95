//! Pattern Catalog - runnable demonstrations of classic design patterns
//!
//! This library provides:
//! - A `PatternDemo` contract and an ordered, duplicate-rejecting registry
//! - A runner that captures output and isolates failing demos
//! - A built-in catalog of seventeen pattern demos
//! - Optional `patterns.toml` configuration and local failure telemetry

pub mod cli;
pub mod config;
pub mod demo;
pub mod output;
pub mod patterns;
pub mod registry;
pub mod runner;
pub mod suggest;
pub mod telemetry;
