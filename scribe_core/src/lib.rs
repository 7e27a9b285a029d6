//! The core library for the scribe text editor: the edit session with its
//! undo history, and the local snapshot store that keeps a copy of every
//! saved file.

pub mod buf;
pub mod cfg;
pub mod consts;
pub mod defaults;
pub mod err;
pub mod log;
pub mod prelude;
pub mod state;
pub mod store;
pub mod util;

#[cfg(test)]
mod store_tests;
