//! Execution agent: solves each subtask and tags the results.

use crate::agent::generator::TextGenerator;
use crate::agent::prompt::solve_prompt;
use crate::config::StageConfig;
use crate::error::GenerationError;
use crate::plan::SubtaskList;
use std::fmt;

/// Token whose presence marks a solution as adequate.
const SUCCESS_MARKER: &str = "success";

/// Outcome of solving one subtask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub task: String,
    pub solution: Result<String, GenerationError>,
}

impl TaskResult {
    /// Text shown for the solution: the generated text, or the error description.
    pub fn solution_text(&self) -> String {
        match &self.solution {
            Ok(text) => text.clone(),
            Err(e) => format!("Error solving the task: {}", e),
        }
    }
}

/// Heuristic quality label for a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionTag {
    Adequate,
    Inadequate,
}

impl ReflectionTag {
    /// Case-insensitive substring check for `success`.
    ///
    /// This is a placeholder heuristic, not a semantic judgement.
    pub fn classify(text: &str) -> Self {
        if text.to_lowercase().contains(SUCCESS_MARKER) {
            ReflectionTag::Adequate
        } else {
            ReflectionTag::Inadequate
        }
    }
}

impl fmt::Display for ReflectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflectionTag::Adequate => write!(f, "adequate"),
            ReflectionTag::Inadequate => write!(f, "inadequate"),
        }
    }
}

/// A reflection tag paired with the subtask it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection {
    pub task: String,
    pub tag: ReflectionTag,
}

/// Solves subtasks one at a time. Never mutates the plan.
#[derive(Debug, Clone)]
pub struct ExecutionAgent {
    stage: StageConfig,
}

impl ExecutionAgent {
    pub fn new(stage: StageConfig) -> Self {
        Self { stage }
    }

    /// Solve every subtask in plan order.
    ///
    /// A failing subtask records its error and the pass moves on.
    pub fn solve_all(&self, generator: &dyn TextGenerator, plan: &SubtaskList) -> Vec<TaskResult> {
        plan.snapshot()
            .into_iter()
            .map(|task| {
                let solution = self.solve(generator, &task);
                TaskResult { task, solution }
            })
            .collect()
    }

    fn solve(&self, generator: &dyn TextGenerator, task: &str) -> Result<String, GenerationError> {
        let prompt = solve_prompt(&self.stage.prompt_template, task)
            .map_err(|e| GenerationError::InvalidPrompt(e.to_string()))?;
        generator.generate(&prompt, self.stage.max_tokens)
    }
}

/// Tag each result by its solution text.
pub fn reflect(results: &[TaskResult]) -> Vec<Reflection> {
    results
        .iter()
        .map(|result| Reflection {
            task: result.task.clone(),
            tag: ReflectionTag::classify(&result.solution_text()),
        })
        .collect()
}
