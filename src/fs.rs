//! Filesystem helpers.

use crate::error::{PlanloopError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically write a string to a file.
///
/// Content goes to `.{filename}.tmp` beside the target, is synced, then
/// renamed over the target, so readers see either the old file or the
/// complete new one.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PlanloopError::UserError(format!("invalid file path '{}'", path.display())))?;
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    let write = || -> std::io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PlanloopError::UserError(format!("failed to write '{}': {}", path.display(), e))
    })
}
