//! Saves preferences, drops the in-memory mirror, and reads them back from disk.
//!
//! RUST_LOG=app_data=trace cargo run --example prefs -- --data-dir /tmp/app-data-demo

use app_data::{KeyedJsonStore, StoreConfig};
use clap::Parser;
use color_eyre::Result;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "prefs")]
#[command(about = "Round-trip preferences through the app data store")]
struct Args {
  /// Path to config file (default: ./app-data.yaml or $XDG_CONFIG_HOME/app-data/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Application namespace
  #[arg(short, long, default_value = "demoapp")]
  app_name: String,

  /// Data root to use instead of the platform default
  #[arg(short, long)]
  data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let args = Args::parse();

  let config = StoreConfig::load(args.config.as_deref())?;
  let config = match args.data_dir {
    Some(dir) => config.with_data_dir(dir),
    None => config,
  };

  let store = KeyedJsonStore::new(config.clone());
  store.set_app_name(&args.app_name);
  store.enable_in_memory_cache();

  store.save("prefs", Some(&json!({"theme": "dark"}))).await?;
  store.add_to_array("history", &json!("opened")).await?;
  info!(path = %store.key_path("prefs")?.display(), "saved preferences");

  // A fresh store has an empty mirror, so this read comes from disk
  let restarted = KeyedJsonStore::new(config.with_app_name(&args.app_name));
  let prefs = restarted.get("prefs").await?;
  let history = restarted.get_array("history").await?;

  println!("prefs:   {}", prefs.unwrap_or_default());
  println!("history: {}", serde_json::Value::Array(history));

  Ok(())
}
