use crate::prelude::*;
use crate::store::*;
use crate::test::log::init as test_log_init;

use assert_fs::prelude::*;

fn find<'a>(
  snapshots: &'a [Snapshot],
  filename: &str,
  filepath: &str,
) -> Vec<&'a Snapshot> {
  snapshots
    .iter()
    .filter(|s| s.filename() == filename && s.filepath() == filepath)
    .collect()
}

#[test]
fn upsert_idempotence1() {
  test_log_init();

  let store = SnapshotStore::open_in_memory();
  assert!(store.is_available());
  store.upsert("a.txt", "/tmp/a.txt", "hello");
  store.upsert("a.txt", "/tmp/a.txt", "hello");

  let snapshots = store.list_all();
  let found = find(&snapshots, "a.txt", "/tmp/a.txt");
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].content(), "hello");
  assert_eq!(store.count(), 1);
}

#[test]
fn upsert_overwrite1() {
  test_log_init();

  let store = SnapshotStore::open_in_memory();
  store.upsert("a.txt", "/tmp/a.txt", "first");
  let first = store.list_all().pop().unwrap();
  store.upsert("a.txt", "/tmp/a.txt", "second");
  let snapshots = store.list_all();
  let found = find(&snapshots, "a.txt", "/tmp/a.txt");

  assert_eq!(found.len(), 1);
  assert_eq!(found[0].content(), "second");
  assert!(found[0].last_modified() >= first.last_modified());
  // A true update keeps identity and creation time.
  assert_eq!(found[0].id(), first.id());
  assert_eq!(found[0].created_at(), first.created_at());
}

#[test]
fn upsert_identity1() {
  test_log_init();

  let store = SnapshotStore::open_in_memory();
  store.upsert("a.txt", "/x/a.txt", "x");
  store.upsert("a.txt", "/y/a.txt", "y");
  store.upsert("b.txt", "/x/a.txt", "z");
  assert_eq!(store.count(), 3);

  // Empty filename is rejected.
  store.upsert("", "/x/", "nothing");
  assert_eq!(store.count(), 3);

  // Empty content is fine.
  store.upsert("empty.txt", "empty.txt", "");
  let snapshots = store.list_all();
  assert_eq!(find(&snapshots, "empty.txt", "empty.txt")[0].content(), "");
}

#[test]
fn recency_ordering1() {
  test_log_init();

  let store = SnapshotStore::open_in_memory();
  store.upsert("A", "/A", "a");
  store.upsert("B", "/B", "b");
  let snapshots = store.list_all();
  assert_eq!(snapshots.len(), 2);
  assert_eq!(snapshots[0].filename(), "B");
  assert_eq!(snapshots[1].filename(), "A");

  // Save `A` again, it becomes the newest.
  std::thread::sleep(std::time::Duration::from_millis(2));
  store.upsert("A", "/A", "aa");
  let snapshots = store.list_all();
  assert_eq!(snapshots[0].filename(), "A");
  assert_eq!(snapshots[0].content(), "aa");
  for w in snapshots.windows(2) {
    assert!(w[0].last_modified() >= w[1].last_modified());
  }
}

#[test]
fn get_delete1() {
  test_log_init();

  let store = SnapshotStore::open_in_memory();
  store.upsert("a.txt", "/a.txt", "汤姆");
  let id = store.list_all()[0].id();

  let snapshot = store.get(id).unwrap();
  assert_eq!(snapshot.filename(), "a.txt");
  assert_eq!(snapshot.len_chars(), 2);
  assert!(store.get(id + 100).is_none());

  assert!(store.delete(id));
  assert!(!store.delete(id));
  assert!(store.get(id).is_none());
  assert!(store.list_all().is_empty());

  // Identifiers are never reused.
  store.upsert("a.txt", "/a.txt", "again");
  assert!(store.list_all()[0].id() > id);
}

#[test]
fn unavailable1() {
  test_log_init();

  let mut store = SnapshotStore::unavailable();
  assert!(!store.is_available());
  store.upsert("a.txt", "/a.txt", "hello");
  assert!(store.list_all().is_empty());
  assert!(store.get(1).is_none());
  assert!(!store.delete(1));
  assert_eq!(store.count(), 0);
  assert!(!store.table_exists());
  assert_eq!(store.info().path, None);

  let tmpdir = assert_fs::TempDir::new().unwrap();
  let err = store.export_to(&tmpdir.path().join("backup.db")).unwrap_err();
  assert!(matches!(err, TheErr::NotAvailable(_)));

  store.close();
  store.close();
}

#[test]
fn unavailable2() {
  test_log_init();

  // A directory cannot be the backing file.
  let tmpdir = assert_fs::TempDir::new().unwrap();
  let store = SnapshotStore::open(tmpdir.path());
  assert!(!store.is_available());
  store.upsert("a.txt", "/a.txt", "hello");
  assert!(store.list_all().is_empty());
}

#[test]
fn file_backed1() {
  test_log_init();

  let tmpdir = assert_fs::TempDir::new().unwrap();
  let db = tmpdir.child("nested").child("dir").child("texteditor.db");

  let mut store = SnapshotStore::open(db.path());
  assert!(store.is_available());
  assert!(store.table_exists());
  store.upsert("a.txt", "/a.txt", "persisted");
  store.close();
  assert!(!store.is_available());
  assert!(db.path().exists());

  let mut store = SnapshotStore::open(db.path());
  let snapshots = store.list_all();
  assert_eq!(snapshots.len(), 1);
  assert_eq!(snapshots[0].content(), "persisted");

  let info = store.info();
  assert_eq!(info.path.as_deref(), Some(db.path()));
  assert!(info.exists);
  assert!(info.size_bytes > 0);
  store.close();
}

#[test]
fn read_only1() {
  test_log_init();

  let tmpdir = assert_fs::TempDir::new().unwrap();
  let db = tmpdir.child("texteditor.db");

  // Missing file.
  let store = SnapshotStore::open_read_only(db.path());
  assert!(!store.is_available());

  let mut store = SnapshotStore::open(db.path());
  store.upsert("a.txt", "/a.txt", "hello");
  store.close();

  let store = SnapshotStore::open_read_only(db.path());
  assert!(store.is_available());
  assert!(store.table_exists());
  assert_eq!(store.count(), 1);

  // Writes fail silently.
  store.upsert("b.txt", "/b.txt", "world");
  assert_eq!(store.count(), 1);
}

#[test]
fn read_only2() {
  test_log_init();

  // An empty database has no snapshot table.
  let tmpdir = assert_fs::TempDir::new().unwrap();
  let db = tmpdir.child("empty.db");
  {
    let conn = rusqlite::Connection::open(db.path()).unwrap();
    conn.execute_batch("CREATE TABLE other (x INTEGER);").unwrap();
  }
  let store = SnapshotStore::open_read_only(db.path());
  assert!(store.is_available());
  assert!(!store.table_exists());
  assert!(store.list_all().is_empty());
  assert_eq!(store.count(), 0);
}

#[test]
fn export1() {
  test_log_init();

  let tmpdir = assert_fs::TempDir::new().unwrap();
  let backup = tmpdir.child("backup.db");
  backup.write_str("stale").unwrap();

  let store = SnapshotStore::open_in_memory();
  store.upsert("a.txt", "/a.txt", "hello");
  store.upsert("b.txt", "/b.txt", "world");
  store.export_to(backup.path()).unwrap();

  let exported = SnapshotStore::open_read_only(backup.path());
  assert!(exported.is_available());
  assert_eq!(exported.count(), 2);
  assert_eq!(exported.list_all()[0].filename(), "b.txt");
}
