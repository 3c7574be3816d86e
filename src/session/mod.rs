//! Session: one plan, the agents acting on it, and the text boundary.
//!
//! A [`Session`] owns its generator, its [`PlanAgent`] (and through it the
//! plan) and an [`ExecutionAgent`]. Nothing is process-global, so separate
//! sessions never observe each other's edits. A single session is not
//! synchronized; callers that share one must serialize access themselves.
//!
//! Positions at this boundary are 1-based. The typed methods return
//! `GenerationError`/`IndexError` values; [`Session::perform`] renders every
//! outcome, including failures, to flat text.

mod render;

#[cfg(test)]
mod tests;

pub use render::{render_decompose_error, render_plan, render_reflections, render_solutions};

use crate::agent::{
    CommandGenerator, ExecutionAgent, PlanAgent, Reflection, ReflectionTag, TaskResult,
    TextGenerator, UnconfiguredGenerator, reflect,
};
use crate::config::{Config, StageConfig};
use crate::error::{EditError, GenerationError, IndexError};
use crate::events::{Event, EventAction, EventLog};
use serde_json::json;

/// An action requested by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Decompose { query: String },
    SolveAll,
    ReflectAll,
    Modify { position: usize, text: String },
    Add { text: String },
    Delete { position: usize },
    Show,
}

pub struct Session {
    generator: Box<dyn TextGenerator>,
    planner: PlanAgent,
    executor: ExecutionAgent,
    events: EventLog,
}

impl Session {
    /// Build a session around an explicit generator.
    pub fn new(generator: Box<dyn TextGenerator>, config: &Config, events: EventLog) -> Self {
        Self {
            generator,
            planner: PlanAgent::new(StageConfig::from(&config.decompose)),
            executor: ExecutionAgent::new(StageConfig::from(&config.solve)),
            events,
        }
    }

    /// Build a session using the configured subprocess generator.
    ///
    /// Without a configured command the session still supports editing;
    /// generation calls fail with [`GenerationError::NotConfigured`].
    pub fn from_config(config: &Config, events: EventLog) -> Self {
        let generator: Box<dyn TextGenerator> = if config.generator.is_configured() {
            Box::new(CommandGenerator::new(config.generator.clone()))
        } else {
            Box::new(UnconfiguredGenerator)
        };
        Self::new(generator, config, events)
    }

    /// The current plan.
    pub fn plan(&self) -> &[String] {
        self.planner.subtasks().entries()
    }

    /// Replace the plan with a decomposition of `query`.
    pub fn decompose(&mut self, query: &str) -> Result<&[String], GenerationError> {
        let outcome = self.planner.decompose(self.generator.as_ref(), query);

        self.events.record(Event::new(EventAction::Decompose).with_details(
            match &outcome {
                Ok(plan) => json!({ "ok": true, "subtasks": plan.len() }),
                Err(e) => json!({ "ok": false, "error": e.to_string() }),
            },
        ));

        outcome.map(|_| self.plan())
    }

    /// Solve every subtask of the current plan.
    pub fn solve_all(&self) -> Vec<TaskResult> {
        let results = self
            .executor
            .solve_all(self.generator.as_ref(), self.planner.subtasks());
        self.events
            .record(Event::new(EventAction::Solve).with_details(pass_details(&results)));
        results
    }

    /// Run a fresh solve pass and tag each solution.
    pub fn reflect_all(&self) -> Vec<Reflection> {
        let results = self
            .executor
            .solve_all(self.generator.as_ref(), self.planner.subtasks());
        let reflections = reflect(&results);

        let adequate = reflections
            .iter()
            .filter(|r| r.tag == ReflectionTag::Adequate)
            .count();
        let mut details = pass_details(&results);
        details["adequate"] = json!(adequate);
        self.events
            .record(Event::new(EventAction::Reflect).with_details(details));

        reflections
    }

    /// Replace the subtask at 1-based `position`.
    ///
    /// Empty or whitespace-only text is rejected and the plan is unchanged.
    pub fn modify(&mut self, position: usize, text: &str) -> Result<&[String], EditError> {
        let outcome = check_text(text)
            .and_then(|()| Ok(to_index(position, self.plan().len())?))
            .and_then(|index| Ok(self.planner.modify(index, text)?));
        self.record_edit(EventAction::Modify, Some(position), outcome.as_ref().err().copied());
        outcome.map(|_| self.plan())
    }

    /// Append a subtask.
    ///
    /// Empty or whitespace-only text is rejected and the plan is unchanged.
    pub fn add(&mut self, text: &str) -> Result<&[String], EditError> {
        let outcome = check_text(text).map(|()| self.planner.add(text));
        self.record_edit(EventAction::Add, None, outcome.err());
        outcome.map(|_| self.plan())
    }

    /// Remove the subtask at 1-based `position`.
    pub fn delete(&mut self, position: usize) -> Result<&[String], IndexError> {
        let outcome =
            to_index(position, self.plan().len()).and_then(|index| self.planner.delete(index));
        self.record_edit(
            EventAction::Delete,
            Some(position),
            outcome.as_ref().err().copied().map(EditError::from),
        );
        outcome.map(|_| self.plan())
    }

    /// Perform an action and render its outcome as display text.
    ///
    /// Never fails: errors become their descriptions, and the plan is left
    /// as it was.
    pub fn perform(&mut self, action: Action) -> String {
        match action {
            Action::Decompose { query } => match self.decompose(&query) {
                Ok(plan) => render_plan(plan),
                Err(e) => render_decompose_error(&e),
            },
            Action::SolveAll => render_solutions(&self.solve_all()),
            Action::ReflectAll => render_reflections(&self.reflect_all()),
            Action::Modify { position, text } => match self.modify(position, &text) {
                Ok(plan) => render_plan(plan),
                Err(e) => e.to_string(),
            },
            Action::Add { text } => match self.add(&text) {
                Ok(plan) => render_plan(plan),
                Err(e) => e.to_string(),
            },
            Action::Delete { position } => match self.delete(position) {
                Ok(plan) => render_plan(plan),
                Err(e) => e.to_string(),
            },
            Action::Show => render_plan(self.plan()),
        }
    }

    fn record_edit(&self, action: EventAction, position: Option<usize>, error: Option<EditError>) {
        let mut details = json!({ "ok": error.is_none(), "subtasks": self.plan().len() });
        if let Some(position) = position {
            details["position"] = json!(position);
        }
        if let Some(e) = error {
            details["error"] = json!(e.to_string());
        }
        self.events.record(Event::new(action).with_details(details));
    }
}

/// Plan entries are never empty.
fn check_text(text: &str) -> Result<(), EditError> {
    if text.trim().is_empty() {
        Err(EditError::EmptyText)
    } else {
        Ok(())
    }
}

/// Convert a 1-based position to a 0-based index. Position 0 is never valid.
fn to_index(position: usize, len: usize) -> Result<usize, IndexError> {
    position
        .checked_sub(1)
        .ok_or(IndexError { position, len })
}

fn pass_details(results: &[TaskResult]) -> serde_json::Value {
    let failed = results.iter().filter(|r| r.solution.is_err()).count();
    json!({ "subtasks": results.len(), "failed": failed })
}
