//! File path configs.

use crate::defaults;

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CachedDirs {
  pub config_dir: PathBuf,
  pub cache_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl CachedDirs {
  /// Platform directories detected by `dirs`, falls back to the working
  /// directory when the platform doesn't provide one.
  pub fn detect() -> Self {
    let cwd = PathBuf::from(".");
    Self {
      config_dir: dirs::config_dir().unwrap_or_else(|| cwd.clone()),
      cache_dir: dirs::cache_dir().unwrap_or_else(|| cwd.clone()),
      data_dir: dirs::data_dir().unwrap_or(cwd),
    }
  }
}

/// For windows: `$env:USERPROFILE\AppData\Roaming\scribe`.
/// For others: `$XDG_CONFIG_HOME/scribe` or `$HOME/.config/scribe`.
fn _xdg_config_dir(cached_dirs: &CachedDirs) -> PathBuf {
  cached_dirs.config_dir.join(defaults::cfg::APP_NAME)
}

/// For windows: `$env:USERPROFILE\AppData\Local\scribe-cache`.
/// For others: `$XDG_CACHE_HOME/scribe` or `$HOME/.cache/scribe`.
fn _xdg_cache_dir(cached_dirs: &CachedDirs) -> PathBuf {
  let folder = if cfg!(target_os = "windows") {
    format!("{}-cache", defaults::cfg::APP_NAME)
  } else {
    defaults::cfg::APP_NAME.to_string()
  };
  cached_dirs.cache_dir.join(folder)
}

// For windows: `$env:USERPROFILE\AppData\Roaming\scribe-data`.
// For others: `$XDG_DATA_HOME/scribe` or `$HOME/.local/share/scribe`.
fn _xdg_data_dir(cached_dirs: &CachedDirs) -> PathBuf {
  let folder = if cfg!(target_os = "windows") {
    format!("{}-data", defaults::cfg::APP_NAME)
  } else {
    defaults::cfg::APP_NAME.to_string()
  };
  cached_dirs.data_dir.join(folder)
}

#[derive(Debug, Clone)]
/// File path related configs.
pub struct PathConfig {
  config_home: PathBuf,
  cache_home: PathBuf,
  data_home: PathBuf,
}

impl PathConfig {
  /// Make new path config.
  pub fn new() -> Self {
    Self::_new_with_cached_dirs(&CachedDirs::detect())
  }

  /// Internal constructor.
  pub fn _new_with_cached_dirs(cached_dirs: &CachedDirs) -> Self {
    Self {
      config_home: _xdg_config_dir(cached_dirs),
      cache_home: _xdg_cache_dir(cached_dirs),
      data_home: _xdg_data_dir(cached_dirs),
    }
  }

  /// Get the config home directory.
  pub fn config_home(&self) -> &PathBuf {
    &self.config_home
  }

  /// Get the config file, it may not exist.
  pub fn config_file(&self) -> PathBuf {
    self.config_home.join(defaults::cfg::CONFIG_FILE_NAME)
  }

  /// Get the cache home directory, log files are written here.
  pub fn cache_home(&self) -> &PathBuf {
    &self.cache_home
  }

  /// Get the data home directory.
  pub fn data_home(&self) -> &PathBuf {
    &self.data_home
  }

  /// Get the default snapshot store file.
  pub fn store_file(&self) -> PathBuf {
    self.data_home.join(defaults::store::FILE_NAME)
  }
}

impl Default for PathConfig {
  fn default() -> Self {
    PathConfig::new()
  }
}
