//! Platform application-data root resolution.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the data root on every platform.
pub const APPDATA_ENV: &str = "APPDATA";

/// Host platform, as far as data root resolution cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  Darwin,
  Other,
}

impl Platform {
  pub fn current() -> Self {
    if cfg!(target_os = "macos") {
      Platform::Darwin
    } else {
      Platform::Other
    }
  }
}

/// Resolve the application-data root.
///
/// 1. `APPDATA` if set and non-empty
/// 2. `<home>/Library/Preferences` on darwin
/// 3. `<home>/.local/share` everywhere else
pub fn resolve_data_root(
  appdata: Option<OsString>,
  platform: Platform,
  home: Option<PathBuf>,
) -> Option<PathBuf> {
  if let Some(dir) = appdata.filter(|d| !d.is_empty()) {
    return Some(PathBuf::from(dir));
  }

  let home = home?;
  match platform {
    Platform::Darwin => Some(home.join("Library").join("Preferences")),
    Platform::Other => Some(home.join(".local").join("share")),
  }
}

/// Data root for the current process environment.
pub fn platform_data_root() -> Option<PathBuf> {
  resolve_data_root(
    std::env::var_os(APPDATA_ENV),
    Platform::current(),
    dirs::home_dir(),
  )
}
