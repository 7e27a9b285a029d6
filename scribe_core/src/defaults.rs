//! Default options and values.

pub mod buf;
pub mod cfg;
pub mod store;
