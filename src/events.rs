//! Session event journal.
//!
//! Every session action can be recorded as one line of NDJSON (one JSON
//! object per line) in a journal file chosen by `--event-log` or
//! `events_path` in `planloop.yaml`. With neither set the journal is off.
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: decompose, solve, reflect, modify, add, delete
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `details`: freeform object with action-specific details
//!
//! Details hold counts, positions and error descriptions. Prompts and
//! generated text are not journaled.

use crate::error::{PlanloopError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Goal decomposed into a new plan
    Decompose,
    /// Solve pass over the plan
    Solve,
    /// Reflection pass over a fresh solve
    Reflect,
    /// Subtask replaced
    Modify,
    /// Subtask appended
    Add,
    /// Subtask removed
    Delete,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Decompose => write!(f, "decompose"),
            EventAction::Solve => write!(f, "solve"),
            EventAction::Reflect => write!(f, "reflect"),
            EventAction::Modify => write!(f, "modify"),
            EventAction::Add => write!(f, "add"),
            EventAction::Delete => write!(f, "delete"),
        }
    }
}

/// An event record for the journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PlanloopError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append-only journal target. Disabled when it has no path.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// A journal that drops every event.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event, creating the file and its parent directory if needed.
    pub fn append(&self, event: &Event) -> Result<()> {
        match &self.path {
            Some(path) => append_event(path, event),
            None => Ok(()),
        }
    }

    /// Append an event, reporting a failure on stderr instead of returning it.
    pub fn record(&self, event: Event) {
        if let Err(e) = self.append(&event) {
            eprintln!("Warning: failed to record '{}' event: {}", event.action, e);
        }
    }
}

/// Append `event` as a single JSON line to `path`.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty())
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            PlanloopError::UserError(format!(
                "failed to create events directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            PlanloopError::UserError(format!(
                "failed to open events file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        PlanloopError::UserError(format!(
            "failed to write event to '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}
