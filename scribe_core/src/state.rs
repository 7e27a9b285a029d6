//! Editor state, it glues the edit session with the filesystem and the
//! snapshot store.

use crate::buf::{Buffer, read_file};
use crate::cfg::EditorConfig;
use crate::defaults;
use crate::prelude::*;
use crate::store::{Snapshot, SnapshotId, SnapshotStore, StoreInfo};

use compact_str::ToCompactString;
use path_absolutize::Absolutize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

// Re-export
pub use prompt::{Decision, Prompt};

pub mod prompt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Status line info.
pub struct Status {
  pub modified: bool,
  pub words: usize,
  pub chars: usize,
  /// 1-based
  pub line: usize,
  /// 1-based
  pub column: usize,
  pub title: String,
}

fn absolutize(path: &Path) -> PathBuf {
  match path.absolutize() {
    Ok(abs) => abs.to_path_buf(),
    Err(e) => {
      warn!("Failed to absolutize {:?}: {e}", path);
      path.to_path_buf()
    }
  }
}

/// Append `.<ext>` if the file name has no dot.
fn with_default_extension(path: &Path, ext: &str) -> PathBuf {
  match path.file_name() {
    Some(name) if !name.to_string_lossy().contains('.') && !ext.is_empty() => {
      let mut target = OsString::from(path.as_os_str());
      target.push(".");
      target.push(ext);
      PathBuf::from(target)
    }
    _ => path.to_path_buf(),
  }
}

#[derive(Debug)]
/// The editor state.
///
/// There's only one buffer at a time, and the snapshot store is opened once
/// on startup and closed once on [`EditorState::exit`].
pub struct EditorState {
  buffer: Buffer,
  store: SnapshotStore,
  config: EditorConfig,
}

impl EditorState {
  pub fn new(config: EditorConfig, store: SnapshotStore) -> Self {
    EditorState {
      buffer: Buffer::new(config.buffer_options()),
      store,
      config,
    }
  }

  /// Open the snapshot store configured by `config`, and start with an empty
  /// untitled buffer.
  pub fn startup(config: EditorConfig) -> Self {
    let store = SnapshotStore::open(config.store_path());
    Self::new(config, store)
  }

  pub fn buffer(&self) -> &Buffer {
    &self.buffer
  }

  pub fn buffer_mut(&mut self) -> &mut Buffer {
    &mut self.buffer
  }

  pub fn store(&self) -> &SnapshotStore {
    &self.store
  }

  pub fn config(&self) -> &EditorConfig {
    &self.config
  }

  pub fn is_modified(&self) -> bool {
    self.buffer.is_modified()
  }

  /// Window title, i.e. `"<file name> - scribe"`.
  pub fn title(&self) -> String {
    match self.buffer.path().and_then(|p| p.file_name()) {
      Some(name) => format!(
        "{} - {}",
        name.to_string_lossy(),
        defaults::cfg::APP_NAME
      ),
      None => defaults::cfg::APP_NAME.to_string(),
    }
  }

  /// The associated file, or "Untitled".
  pub fn file_label(&self) -> String {
    match self.buffer.path() {
      Some(path) => absolutize(path).to_string_lossy().to_string(),
      None => defaults::buf::UNTITLED.to_string(),
    }
  }

  pub fn status(&self) -> Status {
    let (words, chars) = self.buffer.counts();
    let (line, column) = self.buffer.caret_line_column();
    Status {
      modified: self.buffer.is_modified(),
      words,
      chars,
      line,
      column,
      title: self.title(),
    }
  }
}

// File {
impl EditorState {
  /// Ask the user before the unsaved changes are thrown away.
  ///
  /// Returns `true` if the caller can continue.
  fn confirm_discard(&mut self, prompt: &mut dyn Prompt) -> TheResult<bool> {
    if !self.buffer.is_modified() {
      return Ok(true);
    }
    match prompt.confirm_discard() {
      Decision::Save => {
        if self.buffer.path().is_some() {
          self.save()?;
        } else {
          match prompt.save_path() {
            Some(path) => self.save_as(&path)?,
            None => {
              debug!("Save cancelled, no path is given");
              return Ok(false);
            }
          }
        }
        Ok(!self.buffer.is_modified())
      }
      Decision::Discard => {
        debug!("Discard unsaved changes");
        Ok(true)
      }
      Decision::Cancel => Ok(false),
    }
  }

  /// Start an empty untitled buffer.
  ///
  /// Returns `false` if the user cancelled.
  pub fn new_file(&mut self, prompt: &mut dyn Prompt) -> TheResult<bool> {
    if !self.confirm_discard(prompt)? {
      return Ok(false);
    }
    self.buffer.reset_to("", None);
    Ok(true)
  }

  /// Load a file into the buffer.
  ///
  /// Returns `false` if the user cancelled. If the file cannot be read, the
  /// error is returned and the buffer is not changed.
  pub fn open_file(
    &mut self,
    path: &Path,
    prompt: &mut dyn Prompt,
  ) -> TheResult<bool> {
    if !self.confirm_discard(prompt)? {
      return Ok(false);
    }
    let path = absolutize(path);
    let rope = read_file(&path)?;
    self.buffer.reset_to(rope, Some(path));
    info!("Opened file {:?}", self.buffer.path());
    Ok(true)
  }

  fn save_to(&mut self, path: &Path) -> TheResult<()> {
    self.buffer.write_file(path)?;

    let abs = absolutize(path);
    let filename = abs
      .file_name()
      .map(|name| name.to_string_lossy().to_string())
      .unwrap_or_default();
    self.store.upsert(
      &filename,
      &abs.to_string_lossy(),
      &self.buffer.contents(),
    );
    Ok(())
  }

  /// Write the buffer to its associated file, and keep a snapshot in the
  /// store.
  ///
  /// # Errors
  /// It returns [`TheErr::BufferHaveNoFileName`] for untitled buffer, or
  /// [`TheErr::SaveFileFailed`] if the file cannot be written. The snapshot
  /// store never fails the save.
  pub fn save(&mut self) -> TheResult<()> {
    let path = match self.buffer.path() {
      Some(path) => path.to_path_buf(),
      None => bail!(TheErr::BufferHaveNoFileName),
    };
    self.save_to(&path)
  }

  /// Write the buffer to a new file, and associate the buffer with it.
  ///
  /// The configured default extension is appended if the file name has none.
  /// The association only changes when the write succeeds.
  pub fn save_as(&mut self, path: &Path) -> TheResult<()> {
    let target = absolutize(&with_default_extension(
      path,
      self.config.default_extension(),
    ));
    self.save_to(&target)?;
    self.buffer.set_path(Some(target));
    Ok(())
  }

  /// Close the store and let the process end.
  ///
  /// Returns `false` if the user cancelled.
  pub fn exit(&mut self, prompt: &mut dyn Prompt) -> TheResult<bool> {
    if !self.confirm_discard(prompt)? {
      return Ok(false);
    }
    self.store.close();
    Ok(true)
  }
}
// File }

// Snapshot store {
impl EditorState {
  fn available_store(&self) -> TheResult<&SnapshotStore> {
    if self.store.is_available() {
      Ok(&self.store)
    } else {
      Err(TheErr::NotAvailable("Snapshot store".to_compact_string()))
    }
  }

  /// All snapshots, the most recently modified first.
  pub fn snapshots(&self) -> Vec<Snapshot> {
    self.store.list_all()
  }

  /// Load a snapshot into the buffer, the buffer is associated with the
  /// snapshot's path.
  ///
  /// Returns `false` if the user cancelled.
  pub fn open_from_store(
    &mut self,
    id: SnapshotId,
    prompt: &mut dyn Prompt,
  ) -> TheResult<bool> {
    let snapshot = match self.available_store()?.get(id) {
      Some(snapshot) => snapshot,
      None => bail!(TheErr::SnapshotNotExist(id)),
    };
    if !self.confirm_discard(prompt)? {
      return Ok(false);
    }
    self
      .buffer
      .reset_to(snapshot.content(), Some(PathBuf::from(snapshot.filepath())));
    info!("Opened snapshot {id} {:?}", snapshot.filepath());
    Ok(true)
  }

  /// Delete a snapshot, the buffer is not affected.
  ///
  /// Returns `false` if the snapshot doesn't exist.
  pub fn delete_from_store(&mut self, id: SnapshotId) -> TheResult<bool> {
    Ok(self.available_store()?.delete(id))
  }

  pub fn store_info(&self) -> StoreInfo {
    self.store.info()
  }

  /// Copy the whole store into `target`.
  pub fn export_store(&self, target: &Path) -> TheResult<()> {
    self.store.export_to(target)
  }
}
// Snapshot store }
