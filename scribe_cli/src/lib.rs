//! Common utils for scribe executables.

use scribe_core::defaults;
use scribe_core::store::SnapshotStore;

use jiff::Timestamp;
use jiff::tz::TimeZone;
use std::io::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(ts: Timestamp) -> String {
  ts.to_zoned(TimeZone::system())
    .strftime(TIMESTAMP_FORMAT)
    .to_string()
}

/// Print a health report of the snapshot store: whether the snapshot table
/// exists, the total count and every snapshot (newest first).
///
/// Returns `false` if the store cannot be opened or has no snapshot table.
pub fn report<W: Write>(
  store: &SnapshotStore,
  out: &mut W,
) -> std::io::Result<bool> {
  let table = defaults::store::TABLE_NAME;
  let location = match store.path() {
    Some(path) => path.display().to_string(),
    None => ":memory:".to_string(),
  };
  if !store.is_available() {
    writeln!(out, "✗ Cannot open snapshot store {location}")?;
    return Ok(false);
  }
  writeln!(out, "Opened snapshot store {location}")?;

  if !store.table_exists() {
    writeln!(out, "✗ '{table}' table does not exist")?;
    return Ok(false);
  }
  writeln!(out, "✓ '{table}' table exists")?;
  writeln!(out, "Total files in store: {}", store.count())?;

  let snapshots = store.list_all();
  writeln!(out)?;
  writeln!(out, "Files in store:")?;
  writeln!(out, "{}", "=".repeat(80))?;
  for (i, snapshot) in snapshots.iter().enumerate() {
    writeln!(out, "File #{} (id:{}):", i + 1, snapshot.id())?;
    writeln!(out, "  Name: {}", snapshot.filename())?;
    writeln!(out, "  Path: {}", snapshot.filepath())?;
    writeln!(out, "  Size: {} characters", snapshot.len_chars())?;
    writeln!(
      out,
      "  Last Modified: {}",
      format_timestamp(snapshot.last_modified())
    )?;
    writeln!(out, "  Created: {}", format_timestamp(snapshot.created_at()))?;
    writeln!(out)?;
  }
  if snapshots.is_empty() {
    writeln!(out, "No files found in store.")?;
    writeln!(out, "Try saving a file in the text editor first!")?;
  }
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;

  use assert_fs::prelude::*;

  fn report_to_string(store: &SnapshotStore) -> (bool, String) {
    let mut out: Vec<u8> = vec![];
    let ok = report(store, &mut out).unwrap();
    (ok, String::from_utf8(out).unwrap())
  }

  #[test]
  fn report1() {
    let store = SnapshotStore::open_in_memory();
    let (ok, payload) = report_to_string(&store);
    assert!(ok);
    assert!(payload.contains("✓ 'files' table exists"));
    assert!(payload.contains("Total files in store: 0"));
    assert!(payload.contains("No files found in store."));

    store.upsert("a.txt", "/a.txt", "汤姆");
    store.upsert("b.txt", "/b.txt", "hello");
    let (ok, payload) = report_to_string(&store);
    assert!(ok);
    assert!(payload.contains("Total files in store: 2"));
    assert!(payload.contains("  Size: 2 characters"));
    let a = payload.find("Name: a.txt").unwrap();
    let b = payload.find("Name: b.txt").unwrap();
    assert!(b < a);
    assert!(!payload.contains("No files found"));
  }

  #[test]
  fn report2() {
    let (ok, payload) = report_to_string(&SnapshotStore::unavailable());
    assert!(!ok);
    assert!(payload.contains("Cannot open"));

    let tmpdir = assert_fs::TempDir::new().unwrap();
    let db = tmpdir.child("missing.db");
    let store = SnapshotStore::open_read_only(db.path());
    let (ok, _) = report_to_string(&store);
    assert!(!ok);
  }
}
