//! Text content backend for buffer.

use crate::prelude::*;

use compact_str::CompactString;
use ropey::Rope;
use std::ops::Range;

#[derive(Debug, Clone, Default)]
/// Text content backend.
///
/// All positions are absolute char indexes on the whole text, i.e. the
/// 1-dimension coordinate of [`Rope`].
pub struct Text {
  rope: Rope,
}

impl Text {
  pub fn new(rope: Rope) -> Self {
    Self { rope }
  }
}

impl From<&str> for Text {
  fn from(value: &str) -> Self {
    Self::new(Rope::from_str(value))
  }
}

// Rope {
impl Text {
  /// Get rope.
  pub fn rope(&self) -> &Rope {
    &self.rope
  }

  // Get mutable rope.
  //
  // NOTE: Directly get mutable `&mut Rope` is disabled, `Text` provides all
  // kinds of mutable operations.
  fn rope_mut(&mut self) -> &mut Rope {
    &mut self.rope
  }

  /// Total chars.
  pub fn len_chars(&self) -> usize {
    self.rope.len_chars()
  }

  /// Total lines, an empty text still has 1 line.
  pub fn len_lines(&self) -> usize {
    self.rope.len_lines()
  }

  /// Clone the whole text payload.
  pub fn contents(&self) -> String {
    self.rope.to_string()
  }
}
// Rope }

// Position {
impl Text {
  /// Get the `(line_idx, char_idx)` of an absolute char index, both are
  /// 0-based. The char index is clamped to text end.
  ///
  /// The line index is the count of line breaks strictly before the
  /// position, the char index is the distance from the line start.
  pub fn line_and_char(&self, char_idx: usize) -> (usize, usize) {
    let char_idx = std::cmp::min(char_idx, self.rope.len_chars());
    let line_idx = self.rope.char_to_line(char_idx);
    let line_start = self.rope.line_to_char(line_idx);
    (line_idx, char_idx - line_start)
  }
}
// Position }

// Counts {
impl Text {
  /// Count of maximal whitespace-delimited tokens.
  pub fn word_count(&self) -> usize {
    let mut words = 0_usize;
    let mut in_word = false;
    for c in self.rope.chars() {
      if c.is_whitespace() {
        in_word = false;
      } else if !in_word {
        in_word = true;
        words += 1;
      }
    }
    words
  }
}
// Counts }

// Search {
impl Text {
  fn _char_range_of(&self, byte_idx: usize, pattern: &str) -> Range<usize> {
    let start = self.rope.byte_to_char(byte_idx);
    start..(start + pattern.chars().count())
  }

  /// Scan rope chunks since `start_byte_idx`, returns the byte index of the
  /// first occurrence.
  ///
  /// Only the tail of the former chunks that can still be a prefix of
  /// `pattern` is carried into the window, so an occurrence across chunk
  /// boundaries is found without copying the whole text.
  fn _find_byte(&self, pattern: &str, start_byte_idx: usize) -> Option<usize> {
    debug_assert!(!pattern.is_empty());
    let (chunks, chunk_byte_idx, _, _) =
      self.rope.chunks_at_byte(start_byte_idx);

    let mut window = String::new();
    let mut window_start = start_byte_idx;
    for (i, chunk) in chunks.enumerate() {
      let chunk = if i == 0 {
        let skip = start_byte_idx.saturating_sub(chunk_byte_idx);
        &chunk[std::cmp::min(skip, chunk.len())..]
      } else {
        chunk
      };
      window.push_str(chunk);
      if let Some(offset) = window.find(pattern) {
        return Some(window_start + offset);
      }

      let mut keep_from = window.len().saturating_sub(pattern.len() - 1);
      while !window.is_char_boundary(keep_from) {
        keep_from += 1;
      }
      window.drain(..keep_from);
      window_start += keep_from;
    }
    None
  }

  /// Find the first occurrence of `pattern` since `start_char_idx`.
  ///
  /// It returns the char range of the occurrence, returns `None` if not found
  /// or the `pattern` is empty.
  pub fn find(&self, pattern: &str, start_char_idx: usize) -> Option<Range<usize>> {
    if pattern.is_empty() {
      return None;
    }
    let start_char_idx = std::cmp::min(start_char_idx, self.rope.len_chars());
    let start_byte_idx = self.rope.char_to_byte(start_char_idx);
    self
      ._find_byte(pattern, start_byte_idx)
      .map(|byte_idx| self._char_range_of(byte_idx, pattern))
  }

  /// Find all non-overlapping occurrences of `pattern`, ordered from text
  /// start to end.
  pub fn find_all(&self, pattern: &str) -> Vec<Range<usize>> {
    let mut found = vec![];
    if pattern.is_empty() {
      return found;
    }
    let mut start_byte_idx = 0_usize;
    while let Some(byte_idx) = self._find_byte(pattern, start_byte_idx) {
      found.push(self._char_range_of(byte_idx, pattern));
      start_byte_idx = byte_idx + pattern.len();
    }
    found
  }
}
// Search }

// Edit {
impl Text {
  /// Insert text payload at absolute position `char_idx`.
  ///
  /// # Returns
  /// It returns the absolute char index after the inserted payload.
  ///
  /// # Panics
  /// If the position is beyond the text end.
  pub fn insert_at(&mut self, char_idx: usize, payload: &str) -> usize {
    debug_assert!(char_idx <= self.rope.len_chars());
    self.rope_mut().insert(char_idx, payload);
    let char_idx_after = char_idx + payload.chars().count();
    trace!("inserted {:?} at {}..{}", payload, char_idx, char_idx_after);
    char_idx_after
  }

  /// Delete `n` chars at absolute position `char_idx`, to either left or
  /// right direction.
  ///
  /// 1. If `n<0`, delete to the left direction, i.e. delete the range
  ///    `[char_idx+n, char_idx)`.
  /// 2. If `n>0`, delete to the right direction, i.e. delete the range
  ///    `[char_idx, char_idx+n)`.
  /// 3. If `n=0`, delete nothing.
  ///
  /// The range is clamped to the text.
  ///
  /// # Returns
  /// It returns the deleted range and payload, it returns `None` if delete
  /// nothing.
  ///
  /// # Panics
  /// If the position is beyond the text end.
  pub fn delete_at(
    &mut self,
    char_idx: usize,
    n: isize,
  ) -> Option<(Range<usize>, CompactString)> {
    debug_assert!(char_idx <= self.rope.len_chars());

    let to_be_deleted_range = if n > 0 {
      // Delete to right side, on range `[cursor..cursor+n)`.
      char_idx..(std::cmp::min(char_idx + n as usize, self.rope.len_chars()))
    } else {
      // Delete to left side, on range `[cursor-n,cursor)`.
      char_idx.saturating_add_signed(n)..char_idx
    };

    if to_be_deleted_range.is_empty() {
      return None;
    }

    let payload: CompactString = self
      .rope
      .slice(to_be_deleted_range.clone())
      .chars()
      .collect();
    self.rope_mut().remove(to_be_deleted_range.clone());
    trace!("deleted {:?} at {:?}", payload, to_be_deleted_range);

    Some((to_be_deleted_range, payload))
  }
}
// Edit }
