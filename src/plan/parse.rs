//! Line-based parsing of generator output into subtask entries.
//!
//! The generator guarantees no structured format, so the only parsing done
//! is splitting on line boundaries and stripping one list marker per line.

/// Leading marker stripped from each entry.
const LIST_MARKER: char = '-';

/// Normalize a single candidate entry.
///
/// Trims surrounding whitespace and strips a single leading `-` marker.
/// Returns `None` when nothing is left.
pub fn normalize_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix(LIST_MARKER)
        .map(str::trim_start)
        .unwrap_or(trimmed);

    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// Split raw generated text into subtask entries.
///
/// Blank lines and lines that hold only a marker are dropped.
pub fn split_subtasks(text: &str) -> Vec<String> {
    text.lines().filter_map(normalize_entry).collect()
}
