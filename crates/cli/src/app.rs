use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use hotel_core::{Catalog, CatalogError, PaymentStatus, Room};
use tracing::debug;

/// Actions offered by the numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ViewAvailable,
    SearchCategory,
    Book,
    Cancel,
    ViewReservations,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "1" => Ok(Self::ViewAvailable),
            "2" => Ok(Self::SearchCategory),
            "3" => Ok(Self::Book),
            "4" => Ok(Self::Cancel),
            "5" => Ok(Self::ViewReservations),
            "6" => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

const MENU: &str = "\n=== Hotel Reservation System ===
1. View available rooms
2. Search rooms by category
3. Book room
4. Cancel reservation
5. View all reservations
6. Exit";

/// Text menu driving catalog operations over any line-based input.
pub struct Desk<R, W> {
    catalog: Catalog,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Desk<R, W> {
    pub fn new(catalog: Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Hand the catalog back once the menu has exited.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                writeln!(self.output)?;
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::ViewAvailable) => self.show_available()?,
                Ok(MenuChoice::SearchCategory) => self.search_by_category()?,
                Ok(MenuChoice::Book) => self.book_room()?,
                Ok(MenuChoice::Cancel) => self.cancel_reservation()?,
                Ok(MenuChoice::ViewReservations) => self.show_reservations()?,
                Ok(MenuChoice::Exit) => break,
                Err(()) => writeln!(self.output, "Invalid choice.")?,
            }
        }
        writeln!(self.output, "Saving data and exiting...")?;
        self.output.flush()?;
        Ok(())
    }

    fn show_available(&mut self) -> Result<()> {
        writeln!(self.output, "\nAvailable rooms:")?;
        let rooms: Vec<&Room> = self.catalog.list_available().collect();
        print_rooms(&mut self.output, rooms)
    }

    fn search_by_category(&mut self) -> Result<()> {
        let category = self
            .prompt("Category (Standard/Deluxe/Suite): ")?
            .unwrap_or_default();
        writeln!(self.output, "\nRooms in category: {category}")?;
        let rooms: Vec<&Room> = self.catalog.search_by_category(&category).collect();
        print_rooms(&mut self.output, rooms)
    }

    fn book_room(&mut self) -> Result<()> {
        let entered = self
            .prompt("Enter room number to book: ")?
            .unwrap_or_default();
        let room = entered
            .parse::<u32>()
            .ok()
            .and_then(|number| self.catalog.find_room(number))
            .filter(|room| room.is_available());
        let Some(room) = room else {
            writeln!(self.output, "Room not available.")?;
            return Ok(());
        };
        let (number, price) = (room.room_number(), room.price());

        let guest_name = self.prompt("Guest name: ")?.unwrap_or_default();
        if guest_name.is_empty() {
            writeln!(self.output, "Guest name cannot be empty.")?;
            return Ok(());
        }

        writeln!(self.output, "Room price Rs.{price:?}. Simulating payment...")?;
        match self.catalog.book(number, guest_name.as_str()) {
            Ok(reservation) => {
                if reservation.payment_status == PaymentStatus::Paid {
                    writeln!(self.output, "Payment successful.")?;
                }
                writeln!(
                    self.output,
                    "Reservation confirmed for {} in room {}",
                    reservation.guest_name, reservation.room_number
                )?;
            }
            Err(err) => {
                debug!("booking rejected: {err}");
                writeln!(self.output, "Room not available.")?;
            }
        }
        Ok(())
    }

    fn cancel_reservation(&mut self) -> Result<()> {
        let guest_name = self
            .prompt("Enter guest name to cancel: ")?
            .unwrap_or_default();
        match self.catalog.cancel(&guest_name) {
            Ok(_) => writeln!(self.output, "Reservation cancelled for {guest_name}")?,
            Err(CatalogError::ReservationNotFound(_)) => {
                writeln!(self.output, "Reservation not found.")?
            }
            Err(err) => writeln!(self.output, "Cancellation failed: {err}")?,
        }
        Ok(())
    }

    fn show_reservations(&mut self) -> Result<()> {
        writeln!(self.output, "\nCurrent reservations:")?;
        let mut reservations = self.catalog.list_reservations().peekable();
        if reservations.peek().is_none() {
            writeln!(self.output, "No reservations.")?;
        }
        for reservation in reservations {
            writeln!(self.output, "{reservation}")?;
        }
        Ok(())
    }

    /// Print `label` and read one trimmed line. `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn print_rooms(output: &mut impl Write, rooms: Vec<&Room>) -> Result<()> {
    for room in rooms {
        writeln!(output, "{room}")?;
    }
    Ok(())
}
