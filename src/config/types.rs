//! Configuration types and defaults for planloop.
//!
//! This module defines the per-stage settings and the default value
//! functions used by the Config struct.

use crate::agent::prompt::{DEFAULT_DECOMPOSE_TEMPLATE, DEFAULT_SOLVE_TEMPLATE};
use serde::{Deserialize, Serialize};

/// Default output budget for decomposition.
pub const DEFAULT_DECOMPOSE_MAX_TOKENS: usize = 150;

/// Default output budget for solving one subtask.
pub const DEFAULT_SOLVE_MAX_TOKENS: usize = 100;

/// Settings for one generation stage (decompose or solve).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Output-length budget passed to the generator.
    pub max_tokens: usize,

    /// Prompt template for this stage.
    pub prompt_template: String,
}

/// `decompose:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecomposeConfig {
    #[serde(default = "default_decompose_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_decompose_template")]
    pub prompt_template: String,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_decompose_max_tokens(),
            prompt_template: default_decompose_template(),
        }
    }
}

impl From<&DecomposeConfig> for StageConfig {
    fn from(c: &DecomposeConfig) -> Self {
        Self {
            max_tokens: c.max_tokens,
            prompt_template: c.prompt_template.clone(),
        }
    }
}

/// `solve:` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    #[serde(default = "default_solve_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_solve_template")]
    pub prompt_template: String,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_solve_max_tokens(),
            prompt_template: default_solve_template(),
        }
    }
}

impl From<&SolveConfig> for StageConfig {
    fn from(c: &SolveConfig) -> Self {
        Self {
            max_tokens: c.max_tokens,
            prompt_template: c.prompt_template.clone(),
        }
    }
}

pub fn default_decompose_max_tokens() -> usize {
    DEFAULT_DECOMPOSE_MAX_TOKENS
}

pub fn default_solve_max_tokens() -> usize {
    DEFAULT_SOLVE_MAX_TOKENS
}

pub fn default_decompose_template() -> String {
    DEFAULT_DECOMPOSE_TEMPLATE.to_string()
}

pub fn default_solve_template() -> String {
    DEFAULT_SOLVE_TEMPLATE.to_string()
}
