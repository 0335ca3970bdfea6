//! Start-up and shutdown sequencing around the catalog.

use tracing::warn;

use crate::{
    catalog::{self, Catalog},
    error::PersistenceError,
    seed,
    store::{Snapshot, Store},
};

/// Load stored state, seeding default rooms when none were stored.
///
/// Rooms and reservations are stored apart, so availability is re-derived
/// from the loaded reservations before the catalog is handed out.
pub fn open(store: &Store) -> Catalog {
    let Snapshot {
        mut rooms,
        reservations,
    } = store.load();
    if let Some(number) = catalog::first_duplicate(&rooms) {
        warn!("stored rooms repeat room {number}; reseeding defaults");
        rooms.clear();
    }
    seed::seed_if_empty(&mut rooms);

    let mut catalog = Catalog::from_parts(rooms, reservations).unwrap_or_default();
    let corrected = catalog.reconcile_availability();
    if corrected > 0 {
        warn!(corrected, "stored room availability disagreed with reservations");
    }
    catalog
}

/// Persist the catalog before exit.
pub fn close(store: &Store, catalog: &Catalog) -> Result<(), PersistenceError> {
    store.save(catalog)
}
