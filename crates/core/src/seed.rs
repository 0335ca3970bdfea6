//! Default room set installed on first run.

use tracing::info;

use crate::models::{Room, RoomCategory};

const DEFAULT_ROOMS: [(u32, RoomCategory, f64); 5] = [
    (101, RoomCategory::Standard, 2000.0),
    (102, RoomCategory::Standard, 2000.0),
    (201, RoomCategory::Deluxe, 3500.0),
    (202, RoomCategory::Deluxe, 3500.0),
    (301, RoomCategory::Suite, 5000.0),
];

/// The hotel's default rooms, all available.
pub fn default_rooms() -> Vec<Room> {
    DEFAULT_ROOMS
        .iter()
        .filter_map(|&(number, category, price)| Room::new(number, category, price).ok())
        .collect()
}

/// Install the default rooms when `rooms` is empty. Returns whether it did.
pub fn seed_if_empty(rooms: &mut Vec<Room>) -> bool {
    if !rooms.is_empty() {
        return false;
    }
    *rooms = default_rooms();
    info!(count = rooms.len(), "seeded default rooms");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_category() {
        let rooms = default_rooms();
        let summary: Vec<_> = rooms
            .iter()
            .map(|room| (room.room_number(), room.category(), room.price()))
            .collect();
        assert_eq!(summary, DEFAULT_ROOMS.to_vec());
        assert!(rooms.iter().all(Room::is_available));
    }

    #[test]
    fn seeding_only_fills_empty_collections() {
        let mut rooms = Vec::new();
        assert!(seed_if_empty(&mut rooms));
        assert_eq!(rooms.len(), 5);

        let mut existing = vec![Room::new(7, RoomCategory::Suite, 9000.0).unwrap()];
        assert!(!seed_if_empty(&mut existing));
        assert_eq!(existing.len(), 1);
        assert_eq!(existing[0].room_number(), 7);
    }
}
