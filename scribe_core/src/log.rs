//! Logging utils.

use crate::cfg::EditorConfig;
use crate::consts;
use crate::prelude::*;

use jiff::Zoned;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Log file name with the launch time, e.g. `scribe_2025-01-31_12-30-45-123.log`.
pub fn file_name(now: &Zoned) -> String {
  format!(
    "scribe_{:0>4}-{:0>2}-{:0>2}_{:0>2}-{:0>2}-{:0>2}-{:0>3}.log",
    now.date().year(),
    now.date().month(),
    now.date().day(),
    now.time().hour(),
    now.time().minute(),
    now.time().second(),
    now.time().millisecond(),
  )
}

/// Initialize file logging under the cache home directory, one file per
/// launch.
///
/// The filter comes from `log_level` config, a broken directive falls back to
/// `info`.
pub fn init(cfg: &EditorConfig) -> AnyResult<()> {
  init_in(consts::CACHE_HOME_PATH.as_path(), cfg)
}

/// Same as [`init`], but writes log file into `dir`.
pub fn init_in(dir: &Path, cfg: &EditorConfig) -> AnyResult<()> {
  std::fs::create_dir_all(dir)?;

  let filter = EnvFilter::try_new(cfg.log_level())
    .unwrap_or_else(|_| EnvFilter::new(crate::defaults::cfg::LOG_LEVEL));
  let log_name = file_name(&Zoned::now());

  let subscriber = tracing_subscriber::FmtSubscriber::builder()
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_level(true)
    .with_ansi(false)
    .with_env_filter(filter)
    .with_writer(tracing_appender::rolling::never(dir, &log_name))
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  info!("Initialize logging to {:?}", dir.join(log_name));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_name1() {
    let now: Zoned = "2025-01-31T08:05:09.042+00:00[UTC]".parse().unwrap();
    assert_eq!(file_name(&now), "scribe_2025-01-31_08-05-09-042.log");
  }
}
