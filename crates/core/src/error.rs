//! Error types surfaced by the booking core.

use std::path::PathBuf;

use thiserror::Error;

/// Outcomes of catalog operations that did not change any state.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// No room carries the requested number.
    #[error("room {0} does not exist")]
    RoomNotFound(u32),
    /// The room exists but is already booked.
    #[error("room {0} is not available")]
    RoomUnavailable(u32),
    /// No reservation matches the guest name.
    #[error("no reservation found for guest '{0}'")]
    ReservationNotFound(String),
    /// A room with the same number is already in the catalog.
    #[error("room {0} is already registered")]
    DuplicateRoom(u32),
    /// Room prices must be finite and non-negative.
    #[error("room {room_number} has invalid price {price}")]
    InvalidPrice {
        /// Room the price was given for.
        room_number: u32,
        /// Rejected price.
        price: f64,
    },
}

/// Failures reading or writing persisted catalog state.
///
/// Neither variant is fatal: load failures degrade to empty state and save
/// failures are reported to the user.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// A stored collection could not be read or parsed.
    #[error("failed to load {}: {source:#}", path.display())]
    Load {
        /// File that was being read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },
    /// A collection could not be written.
    #[error("failed to save {}: {source:#}", path.display())]
    Save {
        /// File that was being written.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: anyhow::Error,
    },
}
