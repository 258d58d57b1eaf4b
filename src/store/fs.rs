//! Filesystem trait and tokio implementation.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Filesystem primitives the store is built on.
///
/// Each call is a discrete operation; implementations must not keep handles
/// open between calls.
#[async_trait]
pub trait FileSystem: Send + Sync {
  /// Whether a file exists at `path`.
  async fn exists(&self, path: &Path) -> io::Result<bool>;

  /// Read a file as UTF-8 text.
  async fn read_to_string(&self, path: &Path) -> io::Result<String>;

  /// Create or truncate a file and write `contents`.
  async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

  /// Delete a file.
  async fn remove_file(&self, path: &Path) -> io::Result<()>;

  /// Create a directory and all missing parents. Succeeds if it already exists.
  async fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

#[async_trait]
impl FileSystem for TokioFileSystem {
  async fn exists(&self, path: &Path) -> io::Result<bool> {
    tokio::fs::try_exists(path).await
  }

  async fn read_to_string(&self, path: &Path) -> io::Result<String> {
    tokio::fs::read_to_string(path).await
  }

  async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
    tokio::fs::write(path, contents).await
  }

  async fn remove_file(&self, path: &Path) -> io::Result<()> {
    tokio::fs::remove_file(path).await
  }

  async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await
  }
}

#[async_trait]
impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
  async fn exists(&self, path: &Path) -> io::Result<bool> {
    (**self).exists(path).await
  }

  async fn read_to_string(&self, path: &Path) -> io::Result<String> {
    (**self).read_to_string(path).await
  }

  async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
    (**self).write(path, contents).await
  }

  async fn remove_file(&self, path: &Path) -> io::Result<()> {
    (**self).remove_file(path).await
  }

  async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    (**self).create_dir_all(path).await
  }
}
