//! Keyed JSON persistence with an optional in-memory mirror.
//!
//! - One file per key under `<data root>/<app name>/data/<key>.json`
//! - Missing or empty files read as absent, never as errors
//! - The mirror holds raw serialized text and is cleared on every toggle

mod fs;
mod keyed;
mod mirror;

pub use fs::{FileSystem, TokioFileSystem};
pub use keyed::KeyedJsonStore;
