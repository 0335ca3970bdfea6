//! Application configuration.
//!
//! Values come from built-in defaults, then an optional `config.toml` in the
//! user's config directory, then `HOTEL_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::store::{RESERVATIONS_FILE, ROOMS_FILE};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "hotel-desk";

const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Hotel desk configuration.
# Every key can also be set through the environment, e.g. HOTEL_DATA_DIR.

# Directory holding the stored rooms and reservations.
# data_dir = "/path/to/data"

rooms_file = "rooms.json"
reservations_file = "reservations.json"
"#;

/// Resolved configuration for a run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory holding persisted state and logs.
    pub data_dir: PathBuf,
    /// File name of the stored rooms inside `data_dir`.
    pub rooms_file: String,
    /// File name of the stored reservations inside `data_dir`.
    pub reservations_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rooms_file: ROOMS_FILE.to_string(),
            reservations_file: RESERVATIONS_FILE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load configuration layering `path` (if present) over the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .set_default("data_dir", default_data_dir().to_string_lossy().to_string())?
            .set_default("rooms_file", ROOMS_FILE)?
            .set_default("reservations_file", RESERVATIONS_FILE)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("HOTEL"))
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid hotel desk configuration")
    }

    /// Directory receiving the log file.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Path of the user configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Default directory for persisted state.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write a commented default config file on first run.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

fn write_default_config(path: PathBuf) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(())
}
