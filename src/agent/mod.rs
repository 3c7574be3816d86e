//! Agent subsystem for planloop.
//!
//! - **Generator**: the [`TextGenerator`] seam and its subprocess implementation
//! - **Config**: generator backend profile (`generator:` in `planloop.yaml`)
//! - **Prompt**: prompt templates for the two stages
//! - **Dispatch**: subprocess execution with timeout and output capture
//! - **Planner**: [`PlanAgent`], owner of the plan
//! - **Solver**: [`ExecutionAgent`] and the reflection heuristic
//!
//! Agents never hold a generator; each call borrows one, so a session can
//! swap backends without rebuilding its plan.

mod command;
mod config;
pub mod dispatch;
mod generator;
mod planner;
pub mod prompt;
mod solver;

// Re-export public API
pub use command::CommandGenerator;
pub use config::GeneratorProfile;
pub use generator::{TextGenerator, UnconfiguredGenerator};
pub use planner::PlanAgent;
pub use solver::{ExecutionAgent, Reflection, ReflectionTag, TaskResult, reflect};
