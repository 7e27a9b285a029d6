//! VecDeque based fixed-size ringbuf.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
/// A bounded deque, pushing into a full ringbuf evicts items from the front.
pub struct RingBuffer<T> {
  dq: VecDeque<T>,
  max_size: usize,
}

impl<T> RingBuffer<T> {
  /// Make a ringbuf holds at most `max_size` items.
  ///
  /// NOTE: A zero `max_size` is treated as 1, otherwise nothing can be kept.
  pub fn new(max_size: usize) -> Self {
    let max_size = std::cmp::max(max_size, 1);
    Self {
      dq: VecDeque::with_capacity(max_size),
      max_size,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.dq.is_empty()
  }

  pub fn len(&self) -> usize {
    self.dq.len()
  }

  pub fn capacity(&self) -> usize {
    self.max_size
  }

  /// Force push back, remove front items if deque is full.
  ///
  /// Returns the evicted item if any.
  pub fn push_back_overwrite(&mut self, value: T) -> Option<T> {
    let evicted = if self.dq.len() >= self.max_size {
      self.dq.pop_front()
    } else {
      None
    };
    self.dq.push_back(value);
    evicted
  }

  pub fn pop_back(&mut self) -> Option<T> {
    self.dq.pop_back()
  }

  pub fn clear(&mut self) {
    self.dq.clear()
  }

  pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
    self.dq.iter()
  }
}
