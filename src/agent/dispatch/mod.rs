//! Generator subprocess dispatch and execution.
//!
//! This module provides subprocess execution for the generator with:
//!
//! - Per-word command template substitution
//! - Configurable timeout with process termination
//! - Output capture to scratch files
//! - Environment variable merging

mod executor;

pub use executor::execute_generator;
pub(crate) use executor::stderr_tail;
