//! Error types for planloop.
//!
//! Uses thiserror for derive macros. The two domain errors, [`GenerationError`]
//! and [`IndexError`], are returned as values by the core and only turned into
//! display text at the session boundary.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// A text generator call failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No generator command is configured.
    #[error("no generator configured (set `generator.command` in planloop.yaml)")]
    NotConfigured,

    /// The generator command template could not be rendered or parsed.
    #[error("invalid generator command: {0}")]
    InvalidCommand(String),

    /// A prompt template could not be rendered.
    #[error("invalid prompt template: {0}")]
    InvalidPrompt(String),

    /// The generator process could not be started.
    #[error("failed to execute generator '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The generator process exited unsuccessfully.
    ///
    /// `logs` is the kept scratch directory with the prompt and output files.
    #[error(
        "generator exited with {}: {stderr} (logs: {})",
        describe_exit(.exit_code),
        .logs.display()
    )]
    Failed {
        exit_code: Option<i32>,
        stderr: String,
        logs: PathBuf,
    },

    /// The generator process exceeded its timeout and was killed.
    #[error("generator timed out after {seconds}s (logs: {})", .logs.display())]
    TimedOut { seconds: u64, logs: PathBuf },

    /// Reading or writing generator scratch files failed.
    #[error("generator I/O failed: {0}")]
    Io(String),

    /// Any other generator-specific fault.
    #[error("{0}")]
    Other(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code".to_string(),
    }
}

/// An edit addressed a subtask position outside the current plan.
///
/// `position` is 1-based, matching what the user typed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid task index: {position} (plan has {len} subtask(s))")]
pub struct IndexError {
    /// The 1-based position that was requested.
    pub position: usize,
    /// Length of the plan when the edit was attempted.
    pub len: usize,
}

/// A plan edit was rejected at the session boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Subtasks must contain more than whitespace.
    #[error("Subtask text cannot be empty.")]
    EmptyText,
}

/// Main error type for planloop operations.
#[derive(Error, Debug)]
pub enum PlanloopError {
    /// User provided invalid arguments, configuration, or files.
    #[error("{0}")]
    UserError(String),

    /// The text generator failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// An edit referenced a position that does not exist.
    #[error("{0}")]
    Index(#[from] IndexError),
}

impl PlanloopError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlanloopError::UserError(_) => exit_codes::USER_ERROR,
            PlanloopError::Generation(_) => exit_codes::GENERATION_FAILURE,
            PlanloopError::Index(_) => exit_codes::INDEX_ERROR,
        }
    }
}

/// Result type alias for planloop operations.
pub type Result<T> = std::result::Result<T, PlanloopError>;
