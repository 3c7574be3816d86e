//! The ordered subtask plan.
//!
//! A plan is an ordered list of subtask strings. Order is execution order.
//! The list is addressed by 0-based index internally; the session converts
//! the 1-based positions users type before calling in here.

mod list;
mod parse;


pub use list::SubtaskList;
pub use parse::{normalize_entry, split_subtasks};
