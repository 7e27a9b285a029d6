//! Snapshot store, an embedded SQLite table keeps a copy of every saved file.
//!
//! The store is an auxiliary convenience, the filesystem is the primary
//! persistence. Thus all automatic operations (open, upsert, list, ...) never
//! fail the caller: errors are logged, and an empty/no-op result is returned.
//! If the store cannot be opened, it stays unavailable for the whole process
//! and the editor continues with filesystem-only save/open.

use crate::defaults;
use crate::prelude::*;

// Re-export
pub use snapshot::{Snapshot, SnapshotId, StoreInfo};

use compact_str::ToCompactString;
use jiff::Timestamp;
use rusqlite::types::Type;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

pub mod snapshot;

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS files (
  id            INTEGER PRIMARY KEY AUTOINCREMENT,
  filename      TEXT    NOT NULL,
  filepath      TEXT    NOT NULL,
  content       TEXT    NOT NULL,
  last_modified INTEGER NOT NULL,
  created_at    INTEGER NOT NULL,
  UNIQUE (filename, filepath)
);";

// Update in place on conflict, so `id` and `created_at` are preserved. The
// `last_modified` never goes backward even if the system clock does.
const UPSERT: &str = "
INSERT INTO files (filename, filepath, content, last_modified, created_at)
VALUES (?1, ?2, ?3, ?4, ?4)
ON CONFLICT (filename, filepath) DO UPDATE SET
  content = excluded.content,
  last_modified = max(last_modified, excluded.last_modified)";

const SELECT_ALL: &str = "
SELECT id, filename, filepath, content, last_modified, created_at
FROM files
ORDER BY last_modified DESC, id DESC";

const SELECT_BY_ID: &str = "
SELECT id, filename, filepath, content, last_modified, created_at
FROM files
WHERE id = ?1";

const DELETE_BY_ID: &str = "DELETE FROM files WHERE id = ?1";

const COUNT: &str = "SELECT COUNT(*) FROM files";

const TABLE_EXISTS: &str =
  "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1";

fn now_micros() -> i64 {
  Timestamp::now().as_microsecond()
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
  let micros: i64 = row.get(idx)?;
  Timestamp::from_microsecond(micros).map_err(|_| {
    rusqlite::Error::FromSqlConversionFailure(
      idx,
      Type::Integer,
      Box::new(TheErr::InvalidTimestamp(micros)),
    )
  })
}

fn snapshot_from_row(row: &Row) -> rusqlite::Result<Snapshot> {
  Ok(Snapshot::new(
    row.get(0)?,
    row.get(1)?,
    row.get(2)?,
    row.get(3)?,
    timestamp_at(row, 4)?,
    timestamp_at(row, 5)?,
  ))
}

#[derive(Debug)]
/// The snapshot store, it owns the only connection to the backing file.
pub struct SnapshotStore {
  conn: Option<Connection>,
  path: Option<PathBuf>,
}

// Lifecycle {
impl SnapshotStore {
  /// Open (or create) the store file, and ensure the snapshot table exists.
  /// The parent directories are created if not exist.
  ///
  /// NOTE: It never fails, the store is unavailable if anything goes wrong.
  pub fn open(path: &Path) -> Self {
    match Self::_open(path) {
      Ok(conn) => {
        info!("Opened snapshot store {:?}", path);
        Self {
          conn: Some(conn),
          path: Some(path.to_path_buf()),
        }
      }
      Err(e) => {
        error!("{e}, continue without snapshot store");
        Self {
          conn: None,
          path: Some(path.to_path_buf()),
        }
      }
    }
  }

  fn _open(path: &Path) -> TheResult<Connection> {
    let open_failed = |e| TheErr::OpenStoreFailed(path.to_path_buf(), e);

    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() && !parent.exists() {
        if let Err(e) = std::fs::create_dir_all(parent) {
          warn!("Failed to create store directory {:?}: {e}", parent);
        }
      }
    }

    let conn = Connection::open(path).map_err(open_failed)?;
    conn.execute_batch(CREATE_TABLE).map_err(open_failed)?;
    Ok(conn)
  }

  /// Open an existing store file in read-only mode, the snapshot table is not
  /// created if missing. It is used by inspection tools.
  pub fn open_read_only(path: &Path) -> Self {
    match Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY) {
      Ok(conn) => Self {
        conn: Some(conn),
        path: Some(path.to_path_buf()),
      },
      Err(e) => {
        error!("{}", TheErr::OpenStoreFailed(path.to_path_buf(), e));
        Self {
          conn: None,
          path: Some(path.to_path_buf()),
        }
      }
    }
  }

  /// Open a store in memory, nothing is persisted.
  pub fn open_in_memory() -> Self {
    let conn = Connection::open_in_memory()
      .and_then(|conn| conn.execute_batch(CREATE_TABLE).map(|_| conn));
    match conn {
      Ok(conn) => Self {
        conn: Some(conn),
        path: None,
      },
      Err(e) => {
        error!("Failed to open in-memory snapshot store: {e}");
        Self::unavailable()
      }
    }
  }

  /// Make a store that is unavailable, every operation is a no-op.
  pub fn unavailable() -> Self {
    Self {
      conn: None,
      path: None,
    }
  }

  pub fn is_available(&self) -> bool {
    self.conn.is_some()
  }

  /// The backing file, `None` for in-memory store.
  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  /// Release the connection, the store becomes unavailable.
  ///
  /// NOTE: It is idempotent, and it is safe to call on a store never opened.
  pub fn close(&mut self) {
    if let Some(conn) = self.conn.take() {
      match conn.close() {
        Ok(()) => info!("Closed snapshot store {:?}", self.path),
        Err((_conn, e)) => {
          error!("Failed to close snapshot store {:?}: {e}", self.path)
        }
      }
    }
  }

  fn conn(&self, op: &str) -> Option<&Connection> {
    if self.conn.is_none() {
      debug!("Snapshot store is not available, skip {op}");
    }
    self.conn.as_ref()
  }
}
// Lifecycle }

// Snapshots {
impl SnapshotStore {
  /// Insert a snapshot for `(filename, filepath)`, or replace its content if
  /// it already exists. The `last_modified` is refreshed, the `id` and
  /// `created_at` are preserved.
  pub fn upsert(&self, filename: &str, filepath: &str, content: &str) {
    let conn = match self.conn("upsert") {
      Some(conn) => conn,
      None => return,
    };
    if filename.is_empty() {
      error!("Failed to save snapshot {:?}: empty filename", filepath);
      return;
    }
    match conn.execute(UPSERT, params![filename, filepath, content, now_micros()])
    {
      Ok(_) => debug!("Saved snapshot {:?} {:?}", filename, filepath),
      Err(e) => error!(
        "Failed to save snapshot {:?} {:?}: {}",
        filename,
        filepath,
        TheErr::from(e)
      ),
    }
  }

  fn _list_all(conn: &Connection) -> TheResult<Vec<Snapshot>> {
    let mut stmt = conn.prepare(SELECT_ALL)?;
    let snapshots = stmt
      .query_map([], snapshot_from_row)?
      .collect::<rusqlite::Result<Vec<Snapshot>>>()?;
    Ok(snapshots)
  }

  /// List all snapshots, the most recently modified first.
  pub fn list_all(&self) -> Vec<Snapshot> {
    let conn = match self.conn("list") {
      Some(conn) => conn,
      None => return vec![],
    };
    match Self::_list_all(conn) {
      Ok(snapshots) => snapshots,
      Err(e) => {
        error!("Failed to list snapshots: {e}");
        vec![]
      }
    }
  }

  /// Get a snapshot by its ID.
  pub fn get(&self, id: SnapshotId) -> Option<Snapshot> {
    let conn = self.conn("get")?;
    match conn
      .query_row(SELECT_BY_ID, params![id], snapshot_from_row)
      .optional()
    {
      Ok(snapshot) => snapshot,
      Err(e) => {
        error!("Failed to get snapshot {id}: {e}");
        None
      }
    }
  }

  /// Delete a snapshot by its ID.
  ///
  /// Returns `true` if the snapshot existed and is deleted.
  pub fn delete(&self, id: SnapshotId) -> bool {
    let conn = match self.conn("delete") {
      Some(conn) => conn,
      None => return false,
    };
    match conn.execute(DELETE_BY_ID, params![id]) {
      Ok(n) => {
        debug!("Deleted snapshot {id}, rows:{n}");
        n > 0
      }
      Err(e) => {
        error!("Failed to delete snapshot {id}: {e}");
        false
      }
    }
  }

  /// Total snapshots.
  pub fn count(&self) -> usize {
    let conn = match self.conn("count") {
      Some(conn) => conn,
      None => return 0,
    };
    match conn.query_row(COUNT, [], |row| row.get::<_, i64>(0)) {
      Ok(n) => n as usize,
      Err(e) => {
        error!("Failed to count snapshots: {e}");
        0
      }
    }
  }

  /// Whether the snapshot table exists.
  pub fn table_exists(&self) -> bool {
    let conn = match self.conn("table check") {
      Some(conn) => conn,
      None => return false,
    };
    match conn
      .query_row(TABLE_EXISTS, params![defaults::store::TABLE_NAME], |row| {
        row.get::<_, String>(0)
      })
      .optional()
    {
      Ok(name) => name.is_some(),
      Err(e) => {
        error!("Failed to check snapshot table: {e}");
        false
      }
    }
  }
}
// Snapshots }

// Backing file {
impl SnapshotStore {
  /// Location report of the backing file.
  pub fn info(&self) -> StoreInfo {
    match &self.path {
      Some(path) => {
        let metadata = std::fs::metadata(path).ok();
        StoreInfo {
          path: Some(path.clone()),
          exists: metadata.is_some(),
          size_bytes: metadata.map(|m| m.len()).unwrap_or(0),
        }
      }
      None => StoreInfo {
        path: None,
        exists: false,
        size_bytes: 0,
      },
    }
  }

  /// Write a consistent copy of the whole store into `target`, it is
  /// replaced if already exists.
  ///
  /// NOTE: Unlike other operations, this is triggered by user, so the error
  /// is returned to the caller.
  pub fn export_to(&self, target: &Path) -> TheResult<()> {
    let conn = match self.conn.as_ref() {
      Some(conn) => conn,
      None => bail!(TheErr::NotAvailable("Snapshot store".to_compact_string())),
    };
    let export_failed =
      |e: String| TheErr::ExportStoreFailed(target.to_path_buf(), e);

    match std::fs::remove_file(target) {
      Ok(()) => {}
      Err(e) if e.kind() == IoErrKind::NotFound => {}
      Err(e) => bail!(export_failed(e.to_string())),
    }
    conn
      .execute(
        "VACUUM INTO ?1",
        params![target.to_string_lossy().to_string()],
      )
      .map_err(|e| export_failed(e.to_string()))?;

    info!("Exported snapshot store to {:?}", target);
    Ok(())
  }
}
// Backing file }
