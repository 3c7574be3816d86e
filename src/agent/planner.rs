//! Plan agent: decomposes a goal into subtasks and edits the plan.

use crate::agent::generator::TextGenerator;
use crate::agent::prompt::decompose_prompt;
use crate::config::StageConfig;
use crate::error::{GenerationError, IndexError};
use crate::plan::{SubtaskList, split_subtasks};

/// Owns the current plan and rebuilds it from generator output.
#[derive(Debug, Clone)]
pub struct PlanAgent {
    subtasks: SubtaskList,
    stage: StageConfig,
}

impl PlanAgent {
    /// Create an agent with an empty plan.
    pub fn new(stage: StageConfig) -> Self {
        Self {
            subtasks: SubtaskList::new(),
            stage,
        }
    }

    /// Ask the generator to break `query` into subtasks.
    ///
    /// On success the retained plan is replaced wholesale and its new
    /// contents returned. On failure the retained plan is untouched.
    pub fn decompose(
        &mut self,
        generator: &dyn TextGenerator,
        query: &str,
    ) -> Result<Vec<String>, GenerationError> {
        let prompt = decompose_prompt(&self.stage.prompt_template, query)
            .map_err(|e| GenerationError::InvalidPrompt(e.to_string()))?;

        let text = generator.generate(&prompt, self.stage.max_tokens)?;

        self.subtasks.replace_all(split_subtasks(&text));
        Ok(self.subtasks.snapshot())
    }

    /// Replace the subtask at 0-based `index`.
    pub fn modify(&mut self, index: usize, text: impl Into<String>) -> Result<(), IndexError> {
        self.subtasks.modify(index, text)
    }

    /// Remove the subtask at 0-based `index`.
    pub fn delete(&mut self, index: usize) -> Result<String, IndexError> {
        self.subtasks.delete(index)
    }

    /// Append a subtask.
    pub fn add(&mut self, text: impl Into<String>) {
        self.subtasks.add(text);
    }

    /// The current plan.
    pub fn subtasks(&self) -> &SubtaskList {
        &self.subtasks
    }
}
