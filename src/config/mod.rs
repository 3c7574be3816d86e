//! Configuration model for planloop.
//!
//! This module defines the Config struct that represents `planloop.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
pub use types::StageConfig;
