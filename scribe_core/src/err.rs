//! Errors and results.

use crate::store::SnapshotId;
use compact_str::CompactString;
use std::path::PathBuf;

// anyhow {

/// [`anyhow::Error`]
pub type AnyErr = anyhow::Error;

/// [`anyhow::Result`] with `T` if ok, [`AnyErr`]([`anyhow::Error`]) if error.
pub type AnyResult<T> = anyhow::Result<T>;

// anyhow }

// std::io {

/// [`std::io::Error`]
pub type IoErr = std::io::Error;

/// [`std::io::ErrorKind`]
pub type IoErrKind = std::io::ErrorKind;

/// [`std::io::Result`] with `T` if ok.
pub type IoResult<T> = std::io::Result<T>;

// std::io }

// thiserror {

/// All error codes.
#[derive(Debug, thiserror::Error)]
pub enum TheErr {
  // buf {
  #[error("buffer doesn't have a filename")]
  /// Buffer is untitled, it has to be saved with a path.
  BufferHaveNoFileName,

  #[error("Failed to open file `{path}`: {1}", path = .0.display())]
  /// Failed to read file content into buffer
  OpenFileFailed(PathBuf, IoErr),

  #[error("Failed to save file `{path}`: {1}", path = .0.display())]
  /// Buffer failed to write file
  SaveFileFailed(PathBuf, IoErr),

  #[error("Edit position `{0}` is out of text range `{1}`")]
  /// Edit position is beyond the text end
  EditOutOfRange(usize, usize),
  // buf }

  // store {
  #[error("Failed to open snapshot store `{path}`: {1}", path = .0.display())]
  /// Failed to open or initialize the backing store file
  OpenStoreFailed(PathBuf, rusqlite::Error),

  #[error("Snapshot store error: {0}")]
  /// Any failure reported by the store engine
  StoreQueryFailed(#[from] rusqlite::Error),

  #[error("Invalid timestamp `{0}` in snapshot store")]
  /// Persisted timestamp cannot be decoded
  InvalidTimestamp(i64),

  #[error("Snapshot `{0}` not exist")]
  /// Snapshot not found
  SnapshotNotExist(SnapshotId),

  #[error("Failed to export snapshot store to `{path}`: {1}", path = .0.display())]
  /// Failed to copy the store to another file
  ExportStoreFailed(PathBuf, String),

  #[error("{0} is not available")]
  /// Capability cannot be served, e.g. the store is unavailable
  NotAvailable(CompactString),
  // store }

  // cfg {
  #[error("Failed to load config `{path}`: {1}", path = .0.display())]
  /// Config file exists but cannot be read or parsed
  LoadConfigFailed(PathBuf, String),
  // cfg }
}

/// [`Result`] with `T` if ok, [`TheErr`] if error.
pub type TheResult<T> = Result<T, TheErr>;

// thiserror }

#[macro_export]
macro_rules! bail {
  ($e:expr) => {
    return Err($e)
  };
}
