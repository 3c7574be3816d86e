//! Index-addressable subtask storage.

use super::parse::normalize_entry;
use crate::error::IndexError;

/// The current plan: an ordered list of subtask strings.
///
/// Only the owning plan agent mutates it. Deleting an entry closes the gap,
/// so indices are always dense.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskList {
    entries: Vec<String>,
}

impl SubtaskList {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the current plan and store `entries` in order.
    ///
    /// Each entry is normalized like generator output: trimmed, one leading
    /// `-` stripped, blanks dropped. Already-normalized entries are stored
    /// unchanged.
    pub fn replace_all<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries = entries
            .into_iter()
            .filter_map(|entry| normalize_entry(entry.as_ref()))
            .collect();
    }

    /// Replace the entry at `index`.
    ///
    /// Fails without touching the plan when `index` is out of range.
    pub fn modify(&mut self, index: usize, text: impl Into<String>) -> Result<(), IndexError> {
        let len = self.entries.len();
        match self.entries.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                Ok(())
            }
            None => Err(out_of_range(index, len)),
        }
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// Returns the removed entry.
    pub fn delete(&mut self, index: usize) -> Result<String, IndexError> {
        if index < self.entries.len() {
            Ok(self.entries.remove(index))
        } else {
            Err(out_of_range(index, self.entries.len()))
        }
    }

    /// Append an entry to the end of the plan.
    pub fn add(&mut self, text: impl Into<String>) {
        self.entries.push(text.into());
    }

    /// Owned copy of the plan in its current order.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    /// Borrow the entries in order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn out_of_range(index: usize, len: usize) -> IndexError {
    IndexError {
        position: index.saturating_add(1),
        len,
    }
}
