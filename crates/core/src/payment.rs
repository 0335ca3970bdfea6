//! Simulated payment step run during booking.

use tracing::info;

use crate::models::{PaymentStatus, Room};

/// Charge the room price. The simulation always settles.
pub fn settle(room: &Room, guest_name: &str) -> PaymentStatus {
    info!(
        room = room.room_number(),
        guest = guest_name,
        amount = room.price(),
        "simulated payment settled"
    );
    PaymentStatus::Paid
}
