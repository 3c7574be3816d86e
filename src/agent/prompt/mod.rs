//! Prompt generation for the planning and solving stages.
//!
//! # Template Syntax
//!
//! Templates use `{variable}` placeholders:
//!
//! ```text
//! Break down the following task into detailed, actionable steps:
//!
//! Task: {query}
//!
//! Subtasks:
//! ```
//!
//! Use `{{` to escape and render a literal `{`.
//!
//! The decomposition template receives `{query}`; the solve template
//! receives `{task}`.

mod template;

pub use template::{TemplateError, referenced_variables, render_template, vars};

/// Default decomposition prompt.
pub const DEFAULT_DECOMPOSE_TEMPLATE: &str =
    "Break down the following task into detailed, actionable steps:\n\nTask: {query}\n\nSubtasks:";

/// Default solve prompt.
pub const DEFAULT_SOLVE_TEMPLATE: &str =
    "How to solve the following task:\n\nTask: {task}\n\nSolution:";

/// Variable exposed to the decomposition template.
pub const QUERY_VAR: &str = "query";

/// Variable exposed to the solve template.
pub const TASK_VAR: &str = "task";

/// Render the decomposition prompt for a user goal.
pub fn decompose_prompt(template: &str, query: &str) -> Result<String, TemplateError> {
    render_template(template, &vars([(QUERY_VAR, query)]))
}

/// Render the solve prompt for one subtask.
pub fn solve_prompt(template: &str, task: &str) -> Result<String, TemplateError> {
    render_template(template, &vars([(TASK_VAR, task)]))
}
