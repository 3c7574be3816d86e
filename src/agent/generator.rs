//! The text generator seam.
//!
//! Both agents talk to the model only through [`TextGenerator`]. The crate
//! ships a subprocess-backed implementation ([`super::CommandGenerator`]);
//! tests use a scripted one.

use crate::error::GenerationError;

/// Produces free text for a prompt.
///
/// `max_tokens` is an output-length budget passed through to the backend.
/// How strictly it is honoured is up to the implementation.
pub trait TextGenerator {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError> {
        (**self).generate(prompt, max_tokens)
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError> {
        (**self).generate(prompt, max_tokens)
    }
}

/// Stand-in used when no generator command is configured.
///
/// Every call fails, so edits and `show` still work while planning and
/// solving report how to configure a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGenerator;

impl TextGenerator for UnconfiguredGenerator {
    fn generate(&self, _prompt: &str, _max_tokens: usize) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}
