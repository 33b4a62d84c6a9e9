//! Parsing and validation of `eqsynth.toml` generator configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`GeneratorConfig`] describing the marker annotation, output naming,
//! pipeline execution strategy, and cache location. Every section is
//! optional; an absent file is equivalent to an empty one.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
