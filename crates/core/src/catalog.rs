//! In-memory owner of rooms and reservations.
//!
//! A room is booked exactly when one reservation references it. The catalog
//! keeps that pairing intact by flipping availability and editing the
//! reservation list together inside each mutating method. The flags are only
//! re-derived when a catalog is reassembled from stored collections.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    error::CatalogError,
    models::{Reservation, Room, RoomCategory},
    payment,
};

/// Rooms in insertion order plus reservations in booking order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    rooms: Vec<Room>,
    reservations: Vec<Reservation>,
}

impl Catalog {
    /// Empty catalog with no rooms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from previously persisted collections.
    pub fn from_parts(
        rooms: Vec<Room>,
        reservations: Vec<Reservation>,
    ) -> Result<Self, CatalogError> {
        if let Some(number) = first_duplicate(&rooms) {
            return Err(CatalogError::DuplicateRoom(number));
        }
        Ok(Self {
            rooms,
            reservations,
        })
    }

    /// Split the catalog back into its two collections.
    pub fn into_parts(self) -> (Vec<Room>, Vec<Reservation>) {
        (self.rooms, self.reservations)
    }

    /// Register a new room at the end of the catalog.
    pub fn add_room(&mut self, room: Room) -> Result<(), CatalogError> {
        if self.find_room(room.room_number()).is_some() {
            return Err(CatalogError::DuplicateRoom(room.room_number()));
        }
        self.rooms.push(room);
        Ok(())
    }

    /// All rooms regardless of availability.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Rooms that can currently be booked, in catalog order.
    pub fn list_available(&self) -> impl Iterator<Item = &Room> + Clone + '_ {
        self.rooms.iter().filter(|room| room.is_available())
    }

    /// Available rooms of the given category. Unknown categories match nothing.
    pub fn search_by_category(&self, category: &str) -> impl Iterator<Item = &Room> + Clone + '_ {
        let wanted = category.parse::<RoomCategory>().ok();
        self.list_available()
            .filter(move |room| Some(room.category()) == wanted)
    }

    /// Look up a room by number.
    pub fn find_room(&self, room_number: u32) -> Option<&Room> {
        self.rooms
            .iter()
            .find(|room| room.room_number() == room_number)
    }

    /// Book an available room for a guest, settling payment on the way.
    pub fn book(
        &mut self,
        room_number: u32,
        guest_name: impl Into<String>,
    ) -> Result<&Reservation, CatalogError> {
        let room = self
            .rooms
            .iter_mut()
            .find(|room| room.room_number() == room_number)
            .ok_or(CatalogError::RoomNotFound(room_number))?;
        if !room.is_available() {
            return Err(CatalogError::RoomUnavailable(room_number));
        }

        let guest_name = guest_name.into();
        let payment_status = payment::settle(room, &guest_name);
        room.set_available(false);

        info!(room = room_number, guest = %guest_name, "room booked");
        let index = self.reservations.len();
        self.reservations.push(Reservation {
            guest_name,
            room_number,
            payment_status,
        });
        Ok(&self.reservations[index])
    }

    /// Cancel the earliest reservation made under `guest_name`.
    ///
    /// The referenced room becomes available again. A reservation whose room
    /// has since disappeared is still removed.
    pub fn cancel(&mut self, guest_name: &str) -> Result<Reservation, CatalogError> {
        let index = self
            .reservations
            .iter()
            .position(|reservation| reservation.is_for_guest(guest_name))
            .ok_or_else(|| CatalogError::ReservationNotFound(guest_name.to_string()))?;
        let reservation = self.reservations.remove(index);

        match self
            .rooms
            .iter_mut()
            .find(|room| room.room_number() == reservation.room_number)
        {
            Some(room) => room.set_available(true),
            None => debug!(
                room = reservation.room_number,
                "cancelled reservation references a missing room"
            ),
        }

        info!(
            room = reservation.room_number,
            guest = %reservation.guest_name,
            "reservation cancelled"
        );
        Ok(reservation)
    }

    /// Reservations in booking order.
    pub fn list_reservations(&self) -> impl Iterator<Item = &Reservation> + Clone + '_ {
        self.reservations.iter()
    }

    /// Re-derive room availability from the reservation list.
    ///
    /// Only needed for state assembled from independently stored collections.
    /// Returns the number of rooms whose flag changed.
    pub(crate) fn reconcile_availability(&mut self) -> usize {
        let reserved: HashSet<u32> = self
            .reservations
            .iter()
            .map(|reservation| reservation.room_number)
            .collect();
        let mut corrected = 0;
        for room in &mut self.rooms {
            let available = !reserved.contains(&room.room_number());
            if room.is_available() != available {
                room.set_available(available);
                corrected += 1;
            }
        }
        corrected
    }
}

/// First room number that appears more than once, if any.
pub(crate) fn first_duplicate(rooms: &[Room]) -> Option<u32> {
    let mut seen = HashSet::with_capacity(rooms.len());
    rooms
        .iter()
        .map(Room::room_number)
        .find(|number| !seen.insert(*number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::PaymentStatus, seed};

    fn seeded() -> Catalog {
        Catalog::from_parts(seed::default_rooms(), Vec::new()).unwrap()
    }

    fn numbers<'a>(rooms: impl Iterator<Item = &'a Room>) -> Vec<u32> {
        rooms.map(Room::room_number).collect()
    }

    fn assert_availability_consistent(catalog: &Catalog) {
        for room in catalog.rooms() {
            let holders = catalog
                .list_reservations()
                .filter(|reservation| reservation.room_number == room.room_number())
                .count();
            if room.is_available() {
                assert_eq!(holders, 0, "room {} available but reserved", room.room_number());
            } else {
                assert_eq!(holders, 1, "room {} booked {holders} times", room.room_number());
            }
        }
    }

    #[test]
    fn book_then_cancel_restores_availability() {
        let mut catalog = seeded();
        assert_eq!(catalog.list_available().count(), 5);

        let reservation = catalog.book(201, "Asha").unwrap().clone();
        assert_eq!(reservation.guest_name, "Asha");
        assert_eq!(reservation.room_number, 201);
        assert_eq!(reservation.payment_status, PaymentStatus::Paid);
        assert!(!numbers(catalog.list_available()).contains(&201));
        assert_availability_consistent(&catalog);

        let cancelled = catalog.cancel("Asha").unwrap();
        assert_eq!(cancelled, reservation);
        assert!(numbers(catalog.list_available()).contains(&201));
        assert_eq!(catalog.list_reservations().count(), 0);
        assert_availability_consistent(&catalog);
    }

    #[test]
    fn double_booking_is_rejected() {
        let mut catalog = seeded();
        catalog.book(101, "Asha").unwrap();
        let before = catalog.clone();

        assert_eq!(
            catalog.book(101, "Ravi").unwrap_err(),
            CatalogError::RoomUnavailable(101)
        );
        assert_eq!(catalog, before);
        assert_availability_consistent(&catalog);
    }

    #[test]
    fn booking_unknown_room_leaves_state_untouched() {
        let mut catalog = seeded();
        let before = catalog.clone();
        assert_eq!(
            catalog.book(999, "Asha").unwrap_err(),
            CatalogError::RoomNotFound(999)
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn cancelling_unknown_guest_leaves_state_untouched() {
        let mut catalog = seeded();
        catalog.book(102, "Asha").unwrap();
        let before = catalog.clone();

        assert_eq!(
            catalog.cancel("Nobody").unwrap_err(),
            CatalogError::ReservationNotFound("Nobody".to_string())
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn cancel_removes_first_match_only() {
        let mut catalog = seeded();
        catalog.book(101, "Asha").unwrap();
        catalog.book(201, "Ravi").unwrap();
        catalog.book(301, "asha").unwrap();

        let cancelled = catalog.cancel("ASHA").unwrap();
        assert_eq!(cancelled.room_number, 101);
        assert_eq!(
            catalog
                .list_reservations()
                .map(|reservation| reservation.room_number)
                .collect::<Vec<_>>(),
            vec![201, 301]
        );
        assert!(catalog.find_room(101).unwrap().is_available());
        assert!(!catalog.find_room(301).unwrap().is_available());
        assert_availability_consistent(&catalog);
    }

    #[test]
    fn cancel_tolerates_missing_room() {
        let orphan = Reservation {
            guest_name: "Ghost".to_string(),
            room_number: 404,
            payment_status: PaymentStatus::Paid,
        };
        let mut catalog = Catalog::from_parts(seed::default_rooms(), vec![orphan.clone()]).unwrap();

        assert_eq!(catalog.cancel("ghost").unwrap(), orphan);
        assert_eq!(catalog.list_reservations().count(), 0);
        assert_eq!(catalog.list_available().count(), 5);
    }

    #[test]
    fn category_search_is_case_insensitive() {
        let catalog = seeded();
        assert_eq!(numbers(catalog.search_by_category("deluxe")), vec![201, 202]);
        assert!(catalog
            .search_by_category("deluxe")
            .all(Room::is_available));
        assert_eq!(catalog.search_by_category("Penthouse").count(), 0);
    }

    #[test]
    fn category_search_skips_booked_rooms() {
        let mut catalog = seeded();
        catalog.book(202, "Asha").unwrap();
        assert_eq!(numbers(catalog.search_by_category("DELUXE")), vec![201]);
    }

    #[test]
    fn available_listing_is_restartable() {
        let catalog = seeded();
        let listing = catalog.list_available();
        assert_eq!(listing.clone().count(), 5);
        assert_eq!(numbers(listing), vec![101, 102, 201, 202, 301]);
    }

    #[test]
    fn duplicate_room_numbers_are_rejected() {
        let mut rooms = seed::default_rooms();
        rooms.push(Room::new(101, RoomCategory::Suite, 1.0).unwrap());
        assert_eq!(
            Catalog::from_parts(rooms, Vec::new()).unwrap_err(),
            CatalogError::DuplicateRoom(101)
        );

        let mut catalog = seeded();
        assert_eq!(
            catalog
                .add_room(Room::new(301, RoomCategory::Suite, 1.0).unwrap())
                .unwrap_err(),
            CatalogError::DuplicateRoom(301)
        );
        catalog
            .add_room(Room::new(401, RoomCategory::Suite, 8000.0).unwrap())
            .unwrap();
        assert_eq!(catalog.rooms().len(), 6);
    }

    #[test]
    fn reconcile_marks_reserved_rooms_booked() {
        let reservations = vec![Reservation {
            guest_name: "Asha".to_string(),
            room_number: 201,
            payment_status: PaymentStatus::Paid,
        }];
        let mut booked_rooms = seed::default_rooms();
        booked_rooms[0].set_available(false);
        let mut catalog = Catalog::from_parts(booked_rooms, reservations).unwrap();

        assert_eq!(catalog.reconcile_availability(), 2);
        assert_availability_consistent(&catalog);
        assert!(catalog.find_room(101).unwrap().is_available());
        assert_eq!(
            catalog.book(201, "Ravi").unwrap_err(),
            CatalogError::RoomUnavailable(201)
        );
        assert_eq!(catalog.reconcile_availability(), 0);
    }

    #[test]
    fn invariant_holds_across_mixed_operations() {
        let mut catalog = seeded();
        let steps: [(&str, u32, &str); 8] = [
            ("book", 101, "Asha"),
            ("book", 201, "Ravi"),
            ("book", 101, "Mina"),
            ("cancel", 0, "asha"),
            ("book", 101, "Mina"),
            ("cancel", 0, "nobody"),
            ("book", 999, "Ravi"),
            ("cancel", 0, "RAVI"),
        ];
        for (op, room, guest) in steps {
            let _ = match op {
                "book" => catalog.book(room, guest).map(|_| ()),
                _ => catalog.cancel(guest).map(|_| ()),
            };
            assert_availability_consistent(&catalog);
        }
        assert_eq!(
            catalog
                .list_reservations()
                .map(|reservation| reservation.guest_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Mina"]
        );
    }
}
