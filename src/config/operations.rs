//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::agent::prompt::{QUERY_VAR, TASK_VAR, referenced_variables};
use crate::error::{PlanloopError, Result};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "planloop.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "PLANLOOP_CONFIG";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PlanloopError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PlanloopError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve and load the effective config.
    ///
    /// Lookup order: `explicit` path, then `$PLANLOOP_CONFIG`, then
    /// `planloop.yaml` in the working directory. An explicit or env path
    /// must exist; a missing default file means built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Self::load(PathBuf::from(path));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                PlanloopError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PlanloopError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - Both token budgets must be positive
    /// - The solve budget must be smaller than the decomposition budget
    /// - Each prompt template may only reference its own variable
    /// - The generator profile must be valid
    pub fn validate(&self) -> Result<()> {
        if self.decompose.max_tokens == 0 || self.solve.max_tokens == 0 {
            return Err(PlanloopError::UserError(
                "config validation failed: max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.solve.max_tokens >= self.decompose.max_tokens {
            return Err(PlanloopError::UserError(format!(
                "config validation failed: solve.max_tokens ({}) must be smaller than decompose.max_tokens ({})",
                self.solve.max_tokens, self.decompose.max_tokens
            )));
        }

        check_template("decompose", &self.decompose.prompt_template, QUERY_VAR)?;
        check_template("solve", &self.solve.prompt_template, TASK_VAR)?;

        self.generator.validate()
    }
}

/// A stage template must parse and reference nothing but `allowed`.
fn check_template(stage: &str, template: &str, allowed: &str) -> Result<()> {
    let names = referenced_variables(template).map_err(|e| {
        PlanloopError::UserError(format!(
            "config validation failed: {}.prompt_template: {}",
            stage, e
        ))
    })?;

    if let Some(other) = names.iter().find(|name| name.as_str() != allowed) {
        return Err(PlanloopError::UserError(format!(
            "config validation failed: {}.prompt_template references '{{{}}}'; only '{{{}}}' is available",
            stage, other, allowed
        )));
    }

    Ok(())
}
