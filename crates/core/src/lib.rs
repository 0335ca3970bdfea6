#![warn(clippy::all, missing_docs)]

//! Core domain logic for the hotel booking desk.
//!
//! This crate hosts the room and reservation models, the catalog that
//! pairs them, configuration handling, and the persistence layer used by
//! the terminal menu and any future frontends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod payment;
pub mod seed;
pub mod store;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{CatalogError, PersistenceError};
pub use models::{PaymentStatus, Reservation, Room, RoomCategory};
pub use store::{Snapshot, Store};
