//! Stored file snapshot.

use jiff::Timestamp;
use std::path::PathBuf;

/// Snapshot ID, it is assigned by the store and never reused.
pub type SnapshotId = i64;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One stored copy of a file's text content, keyed by `(filename, filepath)`.
pub struct Snapshot {
  id: SnapshotId,
  filename: String,
  filepath: String,
  content: String,
  last_modified: Timestamp,
  created_at: Timestamp,
}

impl Snapshot {
  pub fn new(
    id: SnapshotId,
    filename: String,
    filepath: String,
    content: String,
    last_modified: Timestamp,
    created_at: Timestamp,
  ) -> Self {
    Self {
      id,
      filename,
      filepath,
      content,
      last_modified,
      created_at,
    }
  }

  pub fn id(&self) -> SnapshotId {
    self.id
  }

  pub fn filename(&self) -> &str {
    &self.filename
  }

  pub fn filepath(&self) -> &str {
    &self.filepath
  }

  pub fn content(&self) -> &str {
    &self.content
  }

  /// Updated on every write.
  pub fn last_modified(&self) -> Timestamp {
    self.last_modified
  }

  /// Set once on first insert.
  pub fn created_at(&self) -> Timestamp {
    self.created_at
  }

  /// Content size in chars.
  pub fn len_chars(&self) -> usize {
    self.content.chars().count()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Location of the backing store file.
pub struct StoreInfo {
  /// `None` for in-memory store.
  pub path: Option<PathBuf>,
  pub exists: bool,
  pub size_bytes: u64,
}
