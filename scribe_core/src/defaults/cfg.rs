//! Editor config's default values.

/// Application name, it is used in window title and config/data folder names.
pub const APP_NAME: &str = "scribe";

/// Config file name inside the config home.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Extension appended by "save as" when the file name has none.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Logging filter directive.
pub const LOG_LEVEL: &str = "info";
