//! User confirmation before unsaved changes are thrown away.

use std::path::PathBuf;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Answer to "save changes?".
pub enum Decision {
  /// Save the buffer first, then continue.
  Save,
  /// Throw away the changes and continue.
  Discard,
  /// Abort the operation.
  Cancel,
}

/// The user interface side of the editor, it is asked only when the buffer
/// has unsaved changes.
pub trait Prompt {
  /// Ask whether to save the unsaved changes.
  fn confirm_discard(&mut self) -> Decision;

  /// Ask for a path to save an untitled buffer, `None` cancels.
  fn save_path(&mut self) -> Option<PathBuf> {
    None
  }
}
