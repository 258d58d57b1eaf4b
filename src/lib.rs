//! Per-application key-value persistence.
//!
//! Values are stored as JSON files in the platform application-data directory,
//! one file per key, with an optional in-process mirror that saves disk reads.
//!
//! ```no_run
//! # async fn demo() -> app_data::Result<()> {
//! use app_data::{KeyedJsonStore, StoreConfig};
//! use serde_json::json;
//!
//! let store = KeyedJsonStore::new(StoreConfig::new().with_app_name("demoapp"));
//! store.save("prefs", Some(&json!({"theme": "dark"}))).await?;
//! assert_eq!(store.get("prefs").await?, Some(json!({"theme": "dark"})));
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod paths;
mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use store::{FileSystem, KeyedJsonStore, TokioFileSystem};
