//! Buffer options.

use crate::defaults;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferOptions {
  undo_capacity: usize,
}

impl Default for BufferOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl BufferOptions {
  pub fn builder() -> BufferOptionsBuilder {
    BufferOptionsBuilder::default()
  }

  /// Max undo records kept in history.
  pub fn undo_capacity(&self) -> usize {
    self.undo_capacity
  }

  pub fn set_undo_capacity(&mut self, value: usize) {
    self.undo_capacity = value;
  }
}

#[derive(Debug, Copy, Clone)]
/// Buffer options builder.
pub struct BufferOptionsBuilder {
  undo_capacity: usize,
}

impl BufferOptionsBuilder {
  pub fn undo_capacity(&mut self, value: usize) -> &mut Self {
    self.undo_capacity = value;
    self
  }

  pub fn build(&self) -> BufferOptions {
    BufferOptions {
      undo_capacity: self.undo_capacity,
    }
  }
}

impl Default for BufferOptionsBuilder {
  fn default() -> Self {
    BufferOptionsBuilder {
      undo_capacity: defaults::buf::UNDO_CAPACITY,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default1() {
    let opt1 = BufferOptions::default();
    let opt2 = BufferOptionsBuilder::default().build();
    assert_eq!(opt1, opt2);
    assert_eq!(opt1.undo_capacity(), defaults::buf::UNDO_CAPACITY);
  }

  #[test]
  fn builder1() {
    let mut opt = BufferOptions::builder().undo_capacity(7).build();
    assert_eq!(opt.undo_capacity(), 7);
    opt.set_undo_capacity(9);
    assert_eq!(opt.undo_capacity(), 9);
  }
}
