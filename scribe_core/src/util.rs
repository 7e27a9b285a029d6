//! Utils.

pub mod ringbuf;
