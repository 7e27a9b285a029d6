//! The edit session buffer.

use crate::buf::opt::BufferOptions;
use crate::buf::text::Text;
use crate::buf::undo::{Delete, Insert, Operation, UndoManager};
use crate::prelude::*;

use compact_str::{CompactString, ToCompactString};
use ropey::Rope;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

pub mod opt;
pub mod text;
pub mod undo;

#[cfg(test)]
mod undo_tests;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single change on the buffer text.
pub enum Edit {
  /// Insert payload at an absolute char index.
  Insert {
    char_idx: usize,
    payload: CompactString,
  },

  /// Delete `n` chars at an absolute char index, negative `n` deletes to
  /// left, positive `n` deletes to right. See [`Text::delete_at`].
  Delete { char_idx: usize, n: isize },
}

impl Edit {
  pub fn insert(char_idx: usize, payload: &str) -> Self {
    Edit::Insert {
      char_idx,
      payload: payload.to_compact_string(),
    }
  }

  pub fn delete(char_idx: usize, n: isize) -> Self {
    Edit::Delete { char_idx, n }
  }
}

/// Read the full text content of a file.
pub fn read_file(path: &Path) -> TheResult<Rope> {
  let file = match File::open(path) {
    Ok(file) => file,
    Err(e) => bail!(TheErr::OpenFileFailed(path.to_path_buf(), e)),
  };
  Rope::from_reader(BufReader::new(file))
    .map_err(|e| TheErr::OpenFileFailed(path.to_path_buf(), e))
}

#[derive(Debug)]
/// The edit session: the text, its associated file, the modified flag, the
/// caret and the undo history.
///
/// The modified flag is turned on by every edit, undo and redo, and turned
/// off by [`Buffer::write_file`] and [`Buffer::reset_to`]. There's no
/// save-point tracking, i.e. undo back to the saved text still leaves the
/// buffer modified.
pub struct Buffer {
  text: Text,
  path: Option<PathBuf>,
  modified: bool,
  caret: usize,
  options: BufferOptions,
  undo_manager: UndoManager,
}

impl Buffer {
  /// Make an empty untitled buffer.
  pub fn new(options: BufferOptions) -> Self {
    Buffer {
      text: Text::default(),
      path: None,
      modified: false,
      caret: 0,
      options,
      undo_manager: UndoManager::new(options.undo_capacity()),
    }
  }

  pub fn text(&self) -> &Text {
    &self.text
  }

  /// Clone the whole text payload.
  pub fn contents(&self) -> String {
    self.text.contents()
  }

  /// The associated file, `None` for untitled buffer.
  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  pub fn set_path(&mut self, path: Option<PathBuf>) {
    self.path = path;
  }

  pub fn is_modified(&self) -> bool {
    self.modified
  }

  pub fn options(&self) -> &BufferOptions {
    &self.options
  }

  pub fn undo_manager(&self) -> &UndoManager {
    &self.undo_manager
  }

  /// Replace the whole text, clear the modified flag and discard all undo
  /// history.
  pub fn reset_to<R: Into<Rope>>(&mut self, content: R, path: Option<PathBuf>) {
    self.text = Text::new(content.into());
    self.path = path;
    self.modified = false;
    self.caret = 0;
    self.undo_manager.clear();
    debug!(
      "reset buffer to {:?}, chars:{}",
      self.path,
      self.text.len_chars()
    );
  }
}

impl Default for Buffer {
  fn default() -> Self {
    Buffer::new(BufferOptions::default())
  }
}

// Caret {
impl Buffer {
  /// Caret's absolute char index.
  pub fn caret(&self) -> usize {
    self.caret
  }

  /// Move caret, it is clamped to the text end.
  pub fn set_caret(&mut self, char_idx: usize) {
    self.caret = std::cmp::min(char_idx, self.text.len_chars());
  }

  /// Get the 1-based `(line, column)` of an absolute char index for display.
  ///
  /// The index is clamped to the text end, an empty text gives `(1, 1)`.
  pub fn line_column(&self, char_idx: usize) -> (usize, usize) {
    let (line_idx, char_idx) = self.text.line_and_char(char_idx);
    (line_idx + 1, char_idx + 1)
  }

  /// Get the 1-based `(line, column)` of the caret.
  pub fn caret_line_column(&self) -> (usize, usize) {
    self.line_column(self.caret)
  }

  /// Total lines, for the line number gutter.
  pub fn line_count(&self) -> usize {
    self.text.len_lines()
  }

  /// Get `(words, chars)` counts.
  pub fn counts(&self) -> (usize, usize) {
    (self.text.word_count(), self.text.len_chars())
  }
}
// Caret }

// Edit {
impl Buffer {
  /// Apply an edit, record it into undo history and move the caret to the
  /// edited position.
  ///
  /// An edit that changes nothing (empty payload, zero deletion) is ignored
  /// and doesn't touch the modified flag.
  ///
  /// # Errors
  /// It returns [`TheErr::EditOutOfRange`] if the position is beyond the text
  /// end, and nothing is changed.
  pub fn apply_edit(&mut self, edit: Edit) -> TheResult<()> {
    let len_chars = self.text.len_chars();
    match edit {
      Edit::Insert { char_idx, payload } => {
        if char_idx > len_chars {
          bail!(TheErr::EditOutOfRange(char_idx, len_chars));
        }
        if payload.is_empty() {
          return Ok(());
        }
        let char_idx_after = self.text.insert_at(char_idx, payload.as_str());
        self.undo_manager.insert(Insert {
          payload,
          char_idx_before: char_idx,
          char_idx_after,
        });
        self.caret = char_idx_after;
      }
      Edit::Delete { char_idx, n } => {
        if char_idx > len_chars {
          bail!(TheErr::EditOutOfRange(char_idx, len_chars));
        }
        let (range, payload) = match self.text.delete_at(char_idx, n) {
          Some(deleted) => deleted,
          None => return Ok(()),
        };
        let (char_idx_before, char_idx_after) = if n > 0 {
          (range.start, range.start)
        } else {
          (range.end, range.start)
        };
        self.undo_manager.delete(Delete {
          payload,
          char_idx_before,
          char_idx_after,
        });
        self.caret = char_idx_after;
      }
    }
    self.modified = true;
    Ok(())
  }

  pub fn can_undo(&self) -> bool {
    self.undo_manager.can_undo()
  }

  pub fn can_redo(&self) -> bool {
    self.undo_manager.can_redo()
  }

  /// Revert the latest edit.
  ///
  /// Returns `false` if there's nothing to undo.
  pub fn undo(&mut self) -> bool {
    match self.undo_manager.undo() {
      Some(record) => {
        trace!("undo record:{:?}", record.version);
        match record.op {
          Operation::Insert(insert) => {
            let n = insert.payload.chars().count() as isize;
            self.text.delete_at(insert.char_idx_before, n);
            self.caret = insert.char_idx_before;
          }
          Operation::Delete(delete) => {
            self
              .text
              .insert_at(delete.char_idx_after, delete.payload.as_str());
            self.caret = delete.char_idx_before;
          }
        }
        self.modified = true;
        true
      }
      None => {
        debug!("nothing to undo");
        false
      }
    }
  }

  /// Re-apply the latest reverted edit.
  ///
  /// Returns `false` if there's nothing to redo.
  pub fn redo(&mut self) -> bool {
    match self.undo_manager.redo() {
      Some(record) => {
        trace!("redo record:{:?}", record.version);
        match record.op {
          Operation::Insert(insert) => {
            self
              .text
              .insert_at(insert.char_idx_before, insert.payload.as_str());
            self.caret = insert.char_idx_after;
          }
          Operation::Delete(delete) => {
            let n = delete.payload.chars().count() as isize;
            self.text.delete_at(delete.char_idx_after, n);
            self.caret = delete.char_idx_after;
          }
        }
        self.modified = true;
        true
      }
      None => {
        debug!("nothing to redo");
        false
      }
    }
  }
}
// Edit }

// Search {
impl Buffer {
  /// Find next occurrence of `pattern` since the caret, wraps around to the
  /// text start if not found.
  ///
  /// The caret moves to the end of the found range, so the next call
  /// continues after it.
  pub fn find_next(&mut self, pattern: &str) -> Option<Range<usize>> {
    let found = self
      .text
      .find(pattern, self.caret)
      .or_else(|| self.text.find(pattern, 0));
    if let Some(range) = &found {
      self.caret = range.end;
    }
    found
  }

  /// Replace a char range with `replacement`, it is recorded as a deletion
  /// and an insertion.
  pub fn replace_range(
    &mut self,
    range: Range<usize>,
    replacement: &str,
  ) -> TheResult<()> {
    let len_chars = self.text.len_chars();
    if range.end > len_chars || range.start > range.end {
      bail!(TheErr::EditOutOfRange(range.end, len_chars));
    }
    if !range.is_empty() {
      self.apply_edit(Edit::delete(range.start, range.len() as isize))?;
    }
    self.apply_edit(Edit::insert(range.start, replacement))
  }

  /// Replace all occurrences of `pattern` with `replacement`.
  ///
  /// Returns the count of replaced occurrences.
  pub fn replace_all(
    &mut self,
    pattern: &str,
    replacement: &str,
  ) -> TheResult<usize> {
    let found = self.text.find_all(pattern);
    // Replace from text end, so the former ranges are still valid.
    for range in found.iter().rev() {
      self.replace_range(range.clone(), replacement)?;
    }
    Ok(found.len())
  }
}
// Search }

// File {
impl Buffer {
  /// Write the whole text to file (overwrite), and clear the modified flag on
  /// success.
  ///
  /// NOTE: The associated path is not changed.
  pub fn write_file(&mut self, path: &Path) -> TheResult<()> {
    let save_failed = |e: IoErr| TheErr::SaveFileFailed(path.to_path_buf(), e);

    let file = File::create(path).map_err(save_failed)?;
    let mut writer = BufWriter::new(file);
    self.text.rope().write_to(&mut writer).map_err(save_failed)?;
    writer.flush().map_err(save_failed)?;

    self.modified = false;
    debug!(
      "saved buffer to {:?}, chars:{}",
      path,
      self.text.len_chars()
    );
    Ok(())
  }
}
// File }
