//! Flat-text rendering for the presentation boundary.
//!
//! Every action collapses its structured result into plain text: plans are
//! one subtask per line, solutions and reflections are blank-line separated
//! blocks.

use crate::agent::{Reflection, TaskResult};
use crate::error::GenerationError;

/// One subtask per line.
pub fn render_plan(entries: &[String]) -> String {
    entries.join("\n")
}

/// `Task:`/`Solution:` blocks separated by blank lines.
pub fn render_solutions(results: &[TaskResult]) -> String {
    results
        .iter()
        .map(|r| format!("Task: {}\nSolution: {}", r.task, r.solution_text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One reflection sentence per result, separated by blank lines.
pub fn render_reflections(reflections: &[Reflection]) -> String {
    reflections
        .iter()
        .map(|r| format!("Reflection on result: The solution seems {}.", r.tag))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Description shown in place of a plan when decomposition fails.
pub fn render_decompose_error(err: &GenerationError) -> String {
    format!("Error generating subtasks: {}", err)
}
