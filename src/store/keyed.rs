//! JSON values stored one file per key under the application data directory.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, trace};

use super::fs::{FileSystem, TokioFileSystem};
use super::mirror::Mirror;
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::paths;

/// Key-value store persisting each key as `<data root>/<app name>/data/<key>.json`.
///
/// Keys are used verbatim as file stems, so callers must avoid path separators
/// and other characters their filesystem rejects.
///
/// There is no locking: concurrent writers to the same key race at the
/// filesystem and the last completed write wins. `add_to_array` is a plain
/// read-modify-write and can lose appends under concurrency.
pub struct KeyedJsonStore<F: FileSystem = TokioFileSystem> {
  fs: F,
  app_name: RwLock<Option<String>>,
  data_dir: Option<PathBuf>,
  mirror: Mirror,
}

impl KeyedJsonStore<TokioFileSystem> {
  /// Create a store on the real filesystem.
  pub fn new(config: StoreConfig) -> Self {
    Self::with_fs(config, TokioFileSystem)
  }
}

impl<F: FileSystem> KeyedJsonStore<F> {
  /// Create a store on top of the given filesystem.
  pub fn with_fs(config: StoreConfig, fs: F) -> Self {
    Self {
      fs,
      app_name: RwLock::new(config.app_name),
      data_dir: config.data_dir,
      mirror: Mirror::new(config.in_memory_cache),
    }
  }

  /// Set the application namespace. May be called again; later calls move
  /// every subsequent operation to the new namespace.
  pub fn set_app_name(&self, name: impl Into<String>) {
    let mut app_name = self.app_name.write().unwrap_or_else(|e| e.into_inner());
    *app_name = Some(name.into());
  }

  pub fn app_name(&self) -> Option<String> {
    self
      .app_name
      .read()
      .unwrap_or_else(|e| e.into_inner())
      .clone()
  }

  /// Enable the in-memory mirror. Clears it unless it was already enabled.
  pub fn enable_in_memory_cache(&self) {
    if self.mirror.enable() {
      debug!("in-memory cache enabled");
    }
  }

  /// Disable the in-memory mirror. Clears it unless it was already disabled.
  pub fn disable_in_memory_cache(&self) {
    if self.mirror.disable() {
      debug!("in-memory cache disabled");
    }
  }

  pub fn is_in_memory_cache_enabled(&self) -> bool {
    self.mirror.is_enabled()
  }

  /// Directory holding every key file: `<data root>/<app name>/data`.
  pub fn storage_root(&self) -> Result<PathBuf> {
    self.root_for("resolve storage root")
  }

  /// File backing `key`.
  pub fn key_path(&self, key: &str) -> Result<PathBuf> {
    Ok(key_file(&self.root_for("resolve key path")?, key))
  }

  fn root_for(&self, action: &str) -> Result<PathBuf> {
    let app_name = self.app_name().filter(|n| !n.is_empty()).ok_or_else(|| {
      StoreError::Configuration(format!("Cannot {}: application name not set", action))
    })?;

    let data_root = match &self.data_dir {
      Some(dir) => dir.clone(),
      None => paths::platform_data_root().ok_or_else(|| {
        StoreError::Configuration(format!(
          "Cannot {}: could not determine application data directory",
          action
        ))
      })?,
    };

    Ok(data_root.join(app_name).join("data"))
  }

  /// Write raw text for `key`. `None` removes the key instead.
  pub async fn write(&self, key: &str, content: Option<&str>) -> Result<()> {
    let root = self.root_for("write to store")?;

    let Some(content) = content else {
      return self.remove(key).await;
    };

    let path = key_file(&root, key);
    debug!(key, path = %path.display(), bytes = content.len(), "writing key");

    self
      .fs
      .create_dir_all(&root)
      .await
      .map_err(|e| StoreError::storage(&root, e))?;
    self
      .fs
      .write(&path, content)
      .await
      .map_err(|e| StoreError::storage(&path, e))?;

    self.mirror.set(key, content);
    Ok(())
  }

  /// Read raw text for `key`.
  ///
  /// Missing and empty files both read as `None`. A mirrored key is returned
  /// without touching the filesystem; a disk read fills the mirror only if
  /// the key was not written or removed in the meantime.
  pub async fn read(&self, key: &str) -> Result<Option<String>> {
    let root = self.root_for("read from store")?;

    let seen = self.mirror.generation(key);
    if let Some(content) = self.mirror.get(key) {
      trace!(key, "in-memory cache hit");
      return Ok(Some(content));
    }

    let path = key_file(&root, key);
    trace!(key, path = %path.display(), "reading key");

    match self.fs.exists(&path).await {
      Ok(true) => {}
      Ok(false) => return Ok(None),
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(StoreError::storage(&path, e)),
    }

    // The file may vanish between the existence check and the read
    let content = match self.fs.read_to_string(&path).await {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(StoreError::storage(&path, e)),
    };

    if content.is_empty() {
      return Ok(None);
    }

    // A write or remove that finished while we were reading wins
    if !self.mirror.fill(key, &content, seen) {
      trace!(key, "skipped mirror fill");
    }
    Ok(Some(content))
  }

  /// Delete `key`. Removing a missing key is a no-op.
  pub async fn remove(&self, key: &str) -> Result<()> {
    let root = self.root_for("remove from store")?;
    let path = key_file(&root, key);

    let removed = match self.fs.exists(&path).await {
      Ok(false) => false,
      Ok(true) => match self.fs.remove_file(&path).await {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => return Err(StoreError::storage(&path, e)),
      },
      Err(e) if e.kind() == ErrorKind::NotFound => false,
      Err(e) => return Err(StoreError::storage(&path, e)),
    };

    debug!(key, path = %path.display(), removed, "removed key");
    self.mirror.remove(key);
    Ok(())
  }

  /// Serialize `value` to JSON and store it. `None`, or a value that
  /// serializes to JSON `null`, removes the key.
  pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: Option<&T>) -> Result<()> {
    let Some(value) = value else {
      return self.remove(key).await;
    };

    let text = serde_json::to_string(value).map_err(|e| StoreError::serialization(key, e))?;
    if text == "null" {
      return self.remove(key).await;
    }

    self.write(key, Some(&text)).await
  }

  /// Alias for [`save`](Self::save).
  pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: Option<&T>) -> Result<()> {
    self.save(key, value).await
  }

  /// Parsed JSON stored under `key`, or `None` if absent.
  pub async fn get(&self, key: &str) -> Result<Option<Value>> {
    self.get_as(key).await
  }

  /// Stored value for `key` deserialized into `T`.
  pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    match self.read(key).await? {
      Some(text) if !text.is_empty() => serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| StoreError::serialization(key, e)),
      _ => Ok(None),
    }
  }

  /// Stored array for `key`; an absent key (or stored `null`) is an empty array.
  pub async fn get_array(&self, key: &str) -> Result<Vec<Value>> {
    match self.get(key).await? {
      None | Some(Value::Null) => Ok(Vec::new()),
      Some(Value::Array(items)) => Ok(items),
      Some(other) => Err(StoreError::TypeMismatch {
        key: key.to_string(),
        found: json_type_name(&other),
      }),
    }
  }

  /// Append `item` to the array stored under `key`.
  pub async fn add_to_array<T: Serialize + ?Sized>(&self, key: &str, item: &T) -> Result<()> {
    let item = serde_json::to_value(item).map_err(|e| StoreError::serialization(key, e))?;

    let mut items = self.get_array(key).await?;
    items.push(item);

    self.save(key, Some(&items)).await
  }
}

fn key_file(root: &Path, key: &str) -> PathBuf {
  root.join(format!("{}.json", key))
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
