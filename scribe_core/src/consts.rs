//! Global constants.

use std::path::PathBuf;
use std::sync::LazyLock;

use path_config::PathConfig;

pub mod path_config;


static PATH_CONFIG: LazyLock<PathConfig> = LazyLock::new(PathConfig::new);

/// User config home directory, i.e. `$XDG_CONFIG_HOME/scribe`.
pub static CONFIG_HOME_PATH: LazyLock<PathBuf> =
  LazyLock::new(|| PATH_CONFIG.config_home().clone());

/// User config file, i.e. `$XDG_CONFIG_HOME/scribe/config.toml`.
///
/// NOTE: The file is optional, all config options have a default value.
pub static CONFIG_FILE_PATH: LazyLock<PathBuf> =
  LazyLock::new(|| PATH_CONFIG.config_file());

/// Cache home directory, i.e. `$XDG_CACHE_HOME/scribe`.
pub static CACHE_HOME_PATH: LazyLock<PathBuf> =
  LazyLock::new(|| PATH_CONFIG.cache_home().clone());

/// Data home directory, i.e. `$XDG_DATA_HOME/scribe`.
pub static DATA_HOME_PATH: LazyLock<PathBuf> =
  LazyLock::new(|| PATH_CONFIG.data_home().clone());

/// Default snapshot store file, i.e. `$XDG_DATA_HOME/scribe/texteditor.db`.
pub static STORE_FILE_PATH: LazyLock<PathBuf> =
  LazyLock::new(|| PATH_CONFIG.store_file());
