//! Prelude.

// Re-export `tracing`.
pub use tracing::{debug, error, info, trace, warn};

// Re-export errors and results.
pub use crate::bail;
pub use crate::err::*;
