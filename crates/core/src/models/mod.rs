//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Fixed set of room categories offered by the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomCategory {
    /// Entry-level room.
    Standard,
    /// Larger room with upgraded furnishing.
    Deluxe,
    /// Multi-room suite.
    Suite,
}

impl RoomCategory {
    /// All categories in display order.
    pub const ALL: [RoomCategory; 3] = [Self::Standard, Self::Deluxe, Self::Suite];

    /// Title-case label used for display and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Deluxe => "Deluxe",
            Self::Suite => "Suite",
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomCategory {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown room category '{needle}'"))
    }
}

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomRecord")]
pub struct Room {
    room_number: u32,
    category: RoomCategory,
    price: f64,
    available: bool,
}

fn default_available() -> bool {
    true
}

/// Stored form of a room, validated through [`Room::new`] on load.
#[derive(Deserialize)]
struct RoomRecord {
    room_number: u32,
    category: RoomCategory,
    price: f64,
    #[serde(default = "default_available")]
    available: bool,
}

impl TryFrom<RoomRecord> for Room {
    type Error = CatalogError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let mut room = Room::new(record.room_number, record.category, record.price)?;
        room.available = record.available;
        Ok(room)
    }
}

impl Room {
    /// Create an available room, rejecting negative or non-finite prices.
    pub fn new(room_number: u32, category: RoomCategory, price: f64) -> Result<Self, CatalogError> {
        if !price.is_finite() || price < 0.0 {
            return Err(CatalogError::InvalidPrice { room_number, price });
        }
        Ok(Self {
            room_number,
            category,
            price,
            available: true,
        })
    }

    /// Number identifying the room within the catalog.
    pub fn room_number(&self) -> u32 {
        self.room_number
    }

    /// Category the room belongs to.
    pub fn category(&self) -> RoomCategory {
        self.category
    }

    /// Nightly price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Whether the room can currently be booked.
    pub fn is_available(&self) -> bool {
        self.available
    }

    // Only the catalog flips availability, paired with a reservation change.
    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Room {} ({}), Rs.{:?}, {}",
            self.room_number,
            self.category,
            self.price,
            if self.available { "Available" } else { "Booked" }
        )
    }
}

/// Settlement state recorded on a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment settled at booking time.
    Paid,
    /// Payment not yet settled.
    Pending,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
        })
    }
}

/// A guest's hold on a single room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Name the reservation was made under.
    pub guest_name: String,
    /// Number of the reserved room.
    pub room_number: u32,
    /// Payment state at booking time.
    pub payment_status: PaymentStatus,
}

impl Reservation {
    /// Case-insensitive comparison against a guest name query.
    pub fn is_for_guest(&self, guest_name: &str) -> bool {
        self.guest_name
            .chars()
            .flat_map(char::to_lowercase)
            .eq(guest_name.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guest: {}, Room: {}, Payment: {}",
            self.guest_name, self.room_number, self.payment_status
        )
    }
}
