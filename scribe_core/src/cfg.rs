//! Editor config.
//!
//! The config is loaded from `$XDG_CONFIG_HOME/scribe/config.toml`, all
//! options are optional:
//!
//! ```toml
//! store_path = "/home/user/.local/share/scribe/texteditor.db"
//! undo_capacity = 100
//! default_extension = "txt"
//! log_level = "info"
//! ```

use crate::buf::opt::BufferOptions;
use crate::consts;
use crate::defaults;
use crate::prelude::*;

use compact_str::{CompactString, ToCompactString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Raw config file layout.
struct ConfigFile {
  store_path: Option<PathBuf>,
  undo_capacity: Option<usize>,
  default_extension: Option<String>,
  log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
  store_path: PathBuf,
  undo_capacity: usize,
  default_extension: CompactString,
  log_level: CompactString,
}

impl Default for EditorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl EditorConfig {
  pub fn builder() -> EditorConfigBuilder {
    EditorConfigBuilder::default()
  }

  /// Snapshot store file.
  pub fn store_path(&self) -> &Path {
    &self.store_path
  }

  /// Max undo records kept per buffer.
  pub fn undo_capacity(&self) -> usize {
    self.undo_capacity
  }

  /// Extension appended by "save as" when the file name has none, without the
  /// leading dot.
  pub fn default_extension(&self) -> &str {
    &self.default_extension
  }

  /// Logging filter directive, e.g. `info`, `scribe_core=debug`.
  pub fn log_level(&self) -> &str {
    &self.log_level
  }

  pub fn buffer_options(&self) -> BufferOptions {
    BufferOptions::builder()
      .undo_capacity(self.undo_capacity)
      .build()
  }
}

// Load {
impl EditorConfig {
  /// Parse config from toml source, missing options use default values.
  pub fn from_toml_str(source: &str, path: &Path) -> TheResult<Self> {
    let file: ConfigFile = toml::from_str(source).map_err(|e| {
      TheErr::LoadConfigFailed(path.to_path_buf(), e.message().to_string())
    })?;

    let mut builder = Self::builder();
    if let Some(store_path) = file.store_path {
      builder.store_path(store_path);
    }
    if let Some(undo_capacity) = file.undo_capacity {
      builder.undo_capacity(undo_capacity);
    }
    if let Some(ext) = file.default_extension {
      builder.default_extension(ext.trim_start_matches('.'));
    }
    if let Some(level) = file.log_level {
      builder.log_level(&level);
    }
    Ok(builder.build())
  }

  /// Load config file.
  ///
  /// Returns `Ok(None)` if the file doesn't exist.
  pub fn load(path: &Path) -> TheResult<Option<Self>> {
    match std::fs::read_to_string(path) {
      Ok(source) => Self::from_toml_str(&source, path).map(Some),
      Err(e) if e.kind() == IoErrKind::NotFound => Ok(None),
      Err(e) => Err(TheErr::LoadConfigFailed(path.to_path_buf(), e.to_string())),
    }
  }

  /// Load config file at `path`, fallback to default values if it is missing
  /// or broken.
  pub fn load_or_default_from(path: &Path) -> Self {
    match Self::load(path) {
      Ok(Some(config)) => config,
      Ok(None) => Self::default(),
      Err(e) => {
        // Logging may not be initialized yet.
        eprintln!("{e}, use default config");
        error!("{e}, use default config");
        Self::default()
      }
    }
  }

  /// Load the user config file.
  pub fn load_or_default() -> Self {
    Self::load_or_default_from(consts::CONFIG_FILE_PATH.as_path())
  }
}
// Load }

#[derive(Debug, Clone)]
/// Editor config builder.
pub struct EditorConfigBuilder {
  store_path: PathBuf,
  undo_capacity: usize,
  default_extension: CompactString,
  log_level: CompactString,
}

impl EditorConfigBuilder {
  pub fn store_path(&mut self, value: PathBuf) -> &mut Self {
    self.store_path = value;
    self
  }

  pub fn undo_capacity(&mut self, value: usize) -> &mut Self {
    self.undo_capacity = value;
    self
  }

  pub fn default_extension(&mut self, value: &str) -> &mut Self {
    self.default_extension = value.to_compact_string();
    self
  }

  pub fn log_level(&mut self, value: &str) -> &mut Self {
    self.log_level = value.to_compact_string();
    self
  }

  pub fn build(&self) -> EditorConfig {
    EditorConfig {
      store_path: self.store_path.clone(),
      undo_capacity: self.undo_capacity,
      default_extension: self.default_extension.clone(),
      log_level: self.log_level.clone(),
    }
  }
}

impl Default for EditorConfigBuilder {
  fn default() -> Self {
    EditorConfigBuilder {
      store_path: consts::STORE_FILE_PATH.clone(),
      undo_capacity: defaults::buf::UNDO_CAPACITY,
      default_extension: defaults::cfg::DEFAULT_EXTENSION.to_compact_string(),
      log_level: defaults::cfg::LOG_LEVEL.to_compact_string(),
    }
  }
}
