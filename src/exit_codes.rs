//! Exit code constants for the planloop CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad config, unreadable files)
//! - 2: Generation failure (the text generator failed)
//! - 3: Index error (an edit referenced a subtask that does not exist)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or I/O failure.
pub const USER_ERROR: i32 = 1;

/// Generation failure: the generator command failed, timed out, or is missing.
pub const GENERATION_FAILURE: i32 = 2;

/// Index error: a 1-based position outside the current plan.
pub const INDEX_ERROR: i32 = 3;
