//! Inspect the snapshot store of the scribe text editor.

use scribe_core::cfg::EditorConfig;
use scribe_core::log;
use scribe_core::store::SnapshotStore;

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scribe-check", version, about)]
/// Check the snapshot store: the table, the total count and every stored file.
struct Cli {
  /// Store file, defaults to the configured store path.
  db: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let cfg = EditorConfig::load_or_default();
  log::init(&cfg)?;

  let db = cli.db.unwrap_or_else(|| cfg.store_path().to_path_buf());
  tracing::info!("Check snapshot store {:?}", db);

  let mut store = SnapshotStore::open_read_only(&db);
  let ok = scribe_cli::report(&store, &mut std::io::stdout().lock())?;
  store.close();

  if !ok {
    std::process::exit(1);
  }
  Ok(())
}
