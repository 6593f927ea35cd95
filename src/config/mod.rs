//! Configuration for the pattern catalog
//!
//! Provides types and parsing for the optional `patterns.toml` file.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, find_config, find_config_from, load_config, load_from_source,
    merge_cli_overrides, CliOverrides, ConfigError, ConfigSource,
};
pub use schema::*;
