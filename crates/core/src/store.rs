//! On-disk persistence for rooms and reservations.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    config::AppConfig,
    error::PersistenceError,
    models::{Reservation, Room},
};

/// Default file holding the room collection.
pub const ROOMS_FILE: &str = "rooms.json";
/// Default file holding the reservation collection.
pub const RESERVATIONS_FILE: &str = "reservations.json";

/// Serialized wrapper around one stored collection.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<R> {
    saved_at: DateTime<Utc>,
    records: R,
}

/// Collections recovered from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Rooms in stored order.
    pub rooms: Vec<Room>,
    /// Reservations in booking order.
    pub reservations: Vec<Reservation>,
}

/// Reads and writes the two catalog collections under a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    rooms_file: String,
    reservations_file: String,
}

impl Store {
    /// Create a store rooted at `root` using the default file names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rooms_file: ROOMS_FILE.to_string(),
            reservations_file: RESERVATIONS_FILE.to_string(),
        }
    }

    /// Create a store from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            root: config.data_dir.clone(),
            rooms_file: config.rooms_file.clone(),
            reservations_file: config.reservations_file.clone(),
        }
    }

    /// Full path of the rooms file.
    pub fn rooms_path(&self) -> PathBuf {
        self.root.join(&self.rooms_file)
    }

    /// Full path of the reservations file.
    pub fn reservations_path(&self) -> PathBuf {
        self.root.join(&self.reservations_file)
    }

    /// Load both collections, treating any unreadable file as empty.
    pub fn load(&self) -> Snapshot {
        let rooms = self.try_load_rooms().unwrap_or_else(|err| {
            warn!("{err}; starting without stored rooms");
            Vec::new()
        });
        let reservations = self.try_load_reservations().unwrap_or_else(|err| {
            warn!("{err}; starting without stored reservations");
            Vec::new()
        });
        debug!(
            rooms = rooms.len(),
            reservations = reservations.len(),
            "loaded stored state"
        );
        Snapshot {
            rooms,
            reservations,
        }
    }

    /// Load stored rooms. A missing file yields an empty list.
    pub fn try_load_rooms(&self) -> Result<Vec<Room>, PersistenceError> {
        read_records(&self.rooms_path())
    }

    /// Load stored reservations. A missing file yields an empty list.
    pub fn try_load_reservations(&self) -> Result<Vec<Reservation>, PersistenceError> {
        read_records(&self.reservations_path())
    }

    /// Persist both collections of `catalog`.
    pub fn save(&self, catalog: &Catalog) -> Result<(), PersistenceError> {
        let reservations: Vec<&Reservation> = catalog.list_reservations().collect();
        write_records(&self.rooms_path(), catalog.rooms())?;
        write_records(&self.reservations_path(), &reservations)?;
        info!(
            rooms = catalog.rooms().len(),
            reservations = reservations.len(),
            "saved state to {}",
            self.root.display()
        );
        Ok(())
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, PersistenceError> {
    if !path.exists() {
        debug!("no stored state at {}", path.display());
        return Ok(Vec::new());
    }
    read_envelope(path)
        .map(|envelope| envelope.records)
        .map_err(|source| PersistenceError::Load {
            path: path.to_path_buf(),
            source,
        })
}

fn read_envelope<T: DeserializeOwned>(path: &Path) -> Result<Envelope<Vec<T>>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let envelope = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(envelope)
}

fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<(), PersistenceError> {
    write_envelope(path, records).map_err(|source| PersistenceError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn write_envelope<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;

    let envelope = Envelope {
        saved_at: Utc::now(),
        records,
    };
    let serialised = serde_json::to_vec_pretty(&envelope)?;

    // Write beside the target and rename so a crash never truncates the old file.
    let mut staging = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to stage {}", path.display()))?;
    staging
        .write_all(&serialised)
        .with_context(|| format!("failed to write {}", path.display()))?;
    staging
        .persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
