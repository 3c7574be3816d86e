//! Generator backend configuration.
//!
//! This is the `generator:` section of `planloop.yaml`:
//!
//! ```yaml
//! generator:
//!   command: "llm -m gpt2 {prompt}"
//!   timeout_seconds: 300
//!   environment:
//!     KMP_DUPLICATE_LIB_OK: "TRUE"
//!   work_dir: /tmp/planloop
//! ```
//!
//! # Variable Placeholders
//!
//! Command templates support the following placeholders:
//!
//! - `{prompt}` - The rendered prompt text, passed as a single argument
//! - `{prompt_file}` - Absolute path to a file holding the prompt
//! - `{max_tokens}` - Output-length budget for this call

use crate::agent::prompt::referenced_variables;
use crate::error::{PlanloopError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Default timeout for one generator call in seconds.
const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Placeholders a command template may reference.
pub const COMMAND_VARIABLES: &[&str] = &["prompt", "prompt_file", "max_tokens"];

/// Subprocess generator profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorProfile {
    /// Command template. Empty means no generator is configured.
    pub command: String,

    /// Maximum execution time before the process is killed.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Environment variables set for the generator process.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub environment: HashMap<String, String>,

    /// Directory for prompt and output scratch files (default: OS temp dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for GeneratorProfile {
    fn default() -> Self {
        Self {
            command: String::new(),
            timeout_seconds: default_timeout_seconds(),
            environment: HashMap::new(),
            work_dir: None,
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl GeneratorProfile {
    /// Whether a command has been configured.
    pub fn is_configured(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// Scratch directory for prompt and output files.
    pub fn effective_work_dir(&self) -> PathBuf {
        self.work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("planloop"))
    }

    /// Validate the profile.
    ///
    /// Validation rules:
    /// - Timeout must be positive
    /// - The command template only references known placeholders
    /// - The command template parses as shell words
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(PlanloopError::UserError(
                "config validation failed: generator.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if !self.is_configured() {
            return Ok(());
        }

        let names = referenced_variables(&self.command).map_err(|e| {
            PlanloopError::UserError(format!(
                "config validation failed: generator.command: {}",
                e
            ))
        })?;
        if let Some(unknown) = names
            .iter()
            .find(|name| !COMMAND_VARIABLES.contains(&name.as_str()))
        {
            return Err(PlanloopError::UserError(format!(
                "config validation failed: generator.command references unknown placeholder '{{{}}}'\n\
                 Available placeholders: {}",
                unknown,
                COMMAND_VARIABLES.join(", ")
            )));
        }

        shell_words::split(&self.command).map_err(|e| {
            PlanloopError::UserError(format!(
                "config validation failed: generator.command '{}' cannot be parsed: {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.command, e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(command: &str) -> GeneratorProfile {
        GeneratorProfile {
            command: command.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_profile_is_unconfigured_and_valid() {
        let p = GeneratorProfile::default();
        assert!(!p.is_configured());
        assert_eq!(p.timeout_seconds, 300);
        p.validate().unwrap();
    }

    #[test]
    fn test_valid_command_template() {
        profile("llm -m gpt2 --max-tokens {max_tokens} {prompt}")
            .validate()
            .unwrap();
        profile("sh -c \"cat {prompt_file} | ./model\"")
            .validate()
            .unwrap();
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = profile("run {task_id}").validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown placeholder '{task_id}'"));
        assert!(msg.contains("prompt_file"));
    }

    #[test]
    fn test_unparsable_command_rejected() {
        let err = profile("echo \"unmatched {prompt}").validate().unwrap_err();
        assert!(err.to_string().contains("cannot be parsed"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let p = GeneratorProfile {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(p.validate().unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_work_dir_defaults_to_temp() {
        let p = GeneratorProfile::default();
        assert!(p.effective_work_dir().ends_with("planloop"));
    }

    #[test]
    fn test_parse_profile_yaml() {
        let yaml = r#"
command: "llm {prompt}"
timeout_seconds: 30
environment:
  KMP_DUPLICATE_LIB_OK: "TRUE"
"#;
        let p: GeneratorProfile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(p.command, "llm {prompt}");
        assert_eq!(p.timeout_seconds, 30);
        assert_eq!(p.environment.get("KMP_DUPLICATE_LIB_OK").unwrap(), "TRUE");
        assert!(p.work_dir.is_none());
    }
}
