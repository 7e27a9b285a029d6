//! Snapshot store's default values.

/// Store file name inside the data home.
pub const FILE_NAME: &str = "texteditor.db";

/// The snapshot table.
pub const TABLE_NAME: &str = "files";
