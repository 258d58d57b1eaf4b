//! Error kinds surfaced by store operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`KeyedJsonStore`](crate::KeyedJsonStore) operations.
///
/// Missing files are never reported here: a missing key reads as `None` and
/// removing it is a no-op.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The application name is not set, or no data directory could be resolved.
  #[error("{0}")]
  Configuration(String),

  /// A filesystem call failed for a reason other than "not found".
  #[error("storage error at {}: {source}", .path.display())]
  Storage {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A value could not be encoded to or decoded from JSON.
  #[error("failed to (de)serialize value for key \"{key}\": {source}")]
  Serialization {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// An array operation hit a stored value that is not an array.
  #[error("expected an array, got {found} on key \"{key}\"")]
  TypeMismatch { key: String, found: &'static str },
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
  pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Storage {
      path: path.into(),
      source,
    }
  }

  pub(crate) fn serialization(key: &str, source: serde_json::Error) -> Self {
    Self::Serialization {
      key: key.to_string(),
      source,
    }
  }
}
