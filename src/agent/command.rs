//! Subprocess-backed text generator.

use crate::agent::config::GeneratorProfile;
use crate::agent::dispatch::{execute_generator, stderr_tail};
use crate::agent::generator::TextGenerator;
use crate::error::GenerationError;
use std::fs;

/// A [`TextGenerator`] that runs an external command per call.
///
/// The command's standard output, with trailing whitespace removed, is the
/// generated text. Scratch files are removed after a successful call and
/// kept after a failed one for inspection.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    profile: GeneratorProfile,
}

impl CommandGenerator {
    pub fn new(profile: GeneratorProfile) -> Self {
        Self { profile }
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError> {
        let output = execute_generator(&self.profile, prompt, max_tokens)?;

        if output.timed_out {
            return Err(GenerationError::TimedOut {
                seconds: self.profile.timeout_seconds,
                logs: output.call_dir,
            });
        }
        if !output.is_success() {
            return Err(GenerationError::Failed {
                exit_code: output.exit_code,
                stderr: stderr_tail(&output.stderr),
                logs: output.call_dir,
            });
        }

        let _ = fs::remove_dir_all(&output.call_dir);
        Ok(output.stdout.trim_end().to_string())
    }
}
