//! Buffer's default options.

/// Max undo records kept in history, the oldest record is evicted once it is
/// full.
pub const UNDO_CAPACITY: usize = 100;

/// Label for a buffer that is not associated with any file.
pub const UNTITLED: &str = "Untitled";
