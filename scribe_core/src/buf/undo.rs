//! Undo history.

use crate::prelude::*;
use crate::util::ringbuf::RingBuffer;

use compact_str::CompactString;
use std::fmt::Debug;
use std::time::Instant;

pub const START_VERSION: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
  pub payload: CompactString,

  /// Cursor's absolute char idx before doing insertion.
  /// This is also the absolute insertion char index.
  pub char_idx_before: usize,

  /// Cursor's absolute char idx after doing insertion.
  pub char_idx_after: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
  pub payload: CompactString,

  /// Cursor's absolute char idx before doing deletion.
  pub char_idx_before: usize,

  /// Cursor's absolute char idx after doing deletion.
  /// This is also the absolute deletion char index, since the cursor always
  /// stays at the start of the deleted range.
  pub char_idx_after: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An operation is either a [`Insert`] or a [`Delete`].
/// The "Replace" operation is recorded as "Delete"+"Insert" operations.
///
/// Each operation carries enough payload to be inverted, i.e. an insertion
/// is reverted by deleting its payload, a deletion is reverted by inserting
/// its payload back.
pub enum Operation {
  Insert(Insert),
  Delete(Delete),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A record for operation with timestamp.
pub struct Record {
  pub op: Operation,
  pub timestamp: Instant,
  pub version: usize,
}

/// Undo manager maintains two parts:
/// 1. Undo history: The applied operation records, the latest record is at
///    the back. The history is bounded, the oldest record is evicted when it
///    is full.
/// 2. Redo tail: The records reverted by undo, the latest reverted record is
///    at the back. It is cleared whenever a new operation is pushed, i.e. the
///    linear undo semantics.
///
/// NOTE: The undo manager only maintains the records, it never touches the
/// text. The caller applies the inverted (for undo) or original (for redo)
/// operation on the text.
pub struct UndoManager {
  history: RingBuffer<Record>,
  redo_tail: Vec<Record>,
  __next_version: usize,
}

impl Default for UndoManager {
  fn default() -> Self {
    Self::new(crate::defaults::buf::UNDO_CAPACITY)
  }
}

impl Debug for UndoManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("UndoManager")
      .field("history_len", &self.history.len())
      .field("history_capacity", &self.history.capacity())
      .field("redo_tail_len", &self.redo_tail.len())
      .field("__next_version", &self.__next_version)
      .finish()
  }
}

impl UndoManager {
  pub fn new(capacity: usize) -> Self {
    Self {
      history: RingBuffer::new(capacity),
      redo_tail: vec![],
      __next_version: START_VERSION,
    }
  }

  fn next_version(&mut self) -> usize {
    let result = self.__next_version;
    self.__next_version += 1;
    result
  }

  pub fn capacity(&self) -> usize {
    self.history.capacity()
  }

  pub fn history(&self) -> &RingBuffer<Record> {
    &self.history
  }

  pub fn redo_tail(&self) -> &Vec<Record> {
    &self.redo_tail
  }

  pub fn can_undo(&self) -> bool {
    !self.history.is_empty()
  }

  pub fn can_redo(&self) -> bool {
    !self.redo_tail.is_empty()
  }

  fn push(&mut self, op: Operation) {
    let version = self.next_version();
    if !self.redo_tail.is_empty() {
      trace!("discard {} redo records", self.redo_tail.len());
      self.redo_tail.clear();
    }
    let evicted = self.history.push_back_overwrite(Record {
      op,
      timestamp: Instant::now(),
      version,
    });
    if let Some(evicted) = evicted {
      trace!("evict oldest undo record:{:?}", evicted.version);
    }
  }

  pub fn insert(&mut self, op: Insert) {
    debug_assert_eq!(
      op.char_idx_before + op.payload.chars().count(),
      op.char_idx_after
    );
    if op.payload.is_empty() {
      return;
    }
    self.push(Operation::Insert(op));
  }

  pub fn delete(&mut self, op: Delete) {
    debug_assert!(
      op.char_idx_after == op.char_idx_before
        || op.char_idx_before == op.char_idx_after + op.payload.chars().count()
    );
    if op.payload.is_empty() {
      return;
    }
    self.push(Operation::Delete(op));
  }

  /// Take the latest record from history and move it to the redo tail.
  ///
  /// Returns the record to be reverted, returns `None` if history is empty.
  pub fn undo(&mut self) -> Option<Record> {
    let record = self.history.pop_back()?;
    self.redo_tail.push(record.clone());
    Some(record)
  }

  /// Take the latest reverted record from the redo tail and move it back to
  /// history.
  ///
  /// Returns the record to be re-applied, returns `None` if redo tail is
  /// empty.
  pub fn redo(&mut self) -> Option<Record> {
    let record = self.redo_tail.pop()?;
    self.history.push_back_overwrite(record.clone());
    Some(record)
  }

  /// Discard all history and redo tail.
  pub fn clear(&mut self) {
    self.history.clear();
    self.redo_tail.clear();
  }
}
