use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration held by a single store instance.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
  /// Application namespace; every key lives under `<data root>/<app_name>/data`
  pub app_name: Option<String>,
  /// Overrides the platform data root (APPDATA / ~/.local/share / ...)
  pub data_dir: Option<PathBuf>,
  /// Start with the in-memory mirror enabled
  pub in_memory_cache: bool,
}

impl StoreConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
    self.app_name = Some(name.into());
    self
  }

  pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.data_dir = Some(dir.into());
    self
  }

  pub fn with_in_memory_cache(mut self, enabled: bool) -> Self {
    self.in_memory_cache = enabled;
    self
  }

  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./app-data.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/app-data/config.yaml
  ///
  /// Falls back to defaults when no file is found.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("app-data.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("app-data").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }
}
