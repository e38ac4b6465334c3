// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Seat-allocation and ticket-lifecycle engine.
//!
//! The [`BookingEngine`] is the central component: it owns the user
//! directory, the section catalog, the ticket registry, and the seat map,
//! and implements purchase, reassignment, cancellation, and the receipt and
//! seat queries on top of them.
//!
//! # Invariants
//!
//! - No two assignments share a `(section, seat)` pair.
//! - For every section, `available_seats + assignments == total_seats`.
//! - At most one active ticket per user.
//! - Every active ticket matches exactly one seat assignment, and vice versa.
//!
//! # Thread Safety
//!
//! All four registries form one logical unit behind a single
//! `parking_lot::RwLock`. Read-only queries take the shared lock; every
//! mutating operation holds the exclusive lock across its entire
//! validate-check-mutate sequence, so the seat search and the seat commit of
//! a purchase are one critical section and concurrent purchases cannot
//! double-book the last seat. Checks precede all writes, which keeps each
//! failed operation a pure no-op.

use crate::base::{SeatNumber, SectionId, TicketId, UserId};
use crate::catalog::{self, Section, SectionCatalog};
use crate::directory::{Directory, User};
use crate::error::BookingError;
use crate::seat_map::SeatMap;
use crate::ticket::{Receipt, SeatDetail, Ticket};
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// The four registries, treated as one unit under one lock.
#[derive(Debug, Default)]
struct Registries {
    directory: Directory,
    catalog: SectionCatalog,
    /// Active tickets keyed by holder; one entry per user.
    tickets: BTreeMap<UserId, Ticket>,
    seats: SeatMap,
}

impl Registries {
    /// Cross-registry consistency checks, compiled down to nothing in
    /// release builds.
    fn assert_invariants(&self) {
        for section in self.catalog.iter() {
            let allocated = self.seats.allocated_in(section.id);
            debug_assert_eq!(
                section.available_seats + allocated,
                section.total_seats,
                "seat conservation broken in section {}",
                section.id
            );
            if let Some(highest) = self.seats.highest_occupied(section.id) {
                debug_assert!(
                    highest.0 <= section.total_seats,
                    "assignment outside the seat pool of section {}",
                    section.id
                );
            }
        }

        debug_assert_eq!(
            self.tickets.len(),
            self.seats.len(),
            "ticket registry and seat map diverged"
        );
        for (user_id, ticket) in &self.tickets {
            debug_assert_eq!(
                self.seats.occupant(ticket.section_id, ticket.seat),
                Some(*user_id),
                "ticket {} has no matching seat assignment",
                ticket.id
            );
        }
    }
}

/// Ticket booking engine managing users, sections, seats, and tickets.
///
/// State lives for the life of the process: the engine starts empty and is
/// discarded at shutdown. Every operation completes synchronously or fails
/// once with a typed [`BookingError`]; nothing is retried and nothing is
/// logged here.
#[derive(Debug, Default)]
pub struct BookingEngine {
    inner: RwLock<Registries>,
}

impl BookingEngine {
    /// Creates an engine with no users, sections, or tickets.
    pub fn new() -> Self {
        Self::default()
    }

    // === Users ===

    /// Registers a user.
    ///
    /// # Errors
    ///
    /// - [`BookingError::MissingField`] - a field is empty after trimming.
    /// - [`BookingError::InvalidEmail`] - email fails the address pattern.
    /// - [`BookingError::EmailTaken`] - email already registered
    ///   (case-insensitive).
    pub fn create_user(
        &self,
        first: &str,
        last: &str,
        email: &str,
    ) -> Result<User, BookingError> {
        let mut reg = self.inner.write();
        reg.directory.create(first, last, email)
    }

    pub fn get_user(&self, id: UserId) -> Result<User, BookingError> {
        self.inner.read().directory.get(id).cloned()
    }

    /// All registered users. An empty registry reports
    /// [`BookingError::NoUsers`] rather than an empty list.
    pub fn list_users(&self) -> Result<Vec<User>, BookingError> {
        self.inner.read().directory.list()
    }

    /// Rewrites a user's profile. Same validation as [`Self::create_user`];
    /// the email may collide only with the user's own current address.
    pub fn update_user(
        &self,
        id: UserId,
        first: &str,
        last: &str,
        email: &str,
    ) -> Result<User, BookingError> {
        let mut reg = self.inner.write();
        reg.directory.update(id, first, last, email)
    }

    /// Removes a user. Refused with [`BookingError::UserHasTicket`] while the
    /// user holds an active ticket.
    pub fn delete_user(&self, id: UserId) -> Result<(), BookingError> {
        let mut reg = self.inner.write();
        if !reg.directory.contains(id) {
            return Err(BookingError::UserNotFound);
        }
        if reg.tickets.contains_key(&id) {
            return Err(BookingError::UserHasTicket);
        }
        reg.directory.remove(id)
    }

    // === Sections ===

    /// Defines a section with seats `1..=total_seats`, all available.
    pub fn create_section(&self, name: &str, total_seats: u32) -> Result<Section, BookingError> {
        let mut reg = self.inner.write();
        reg.catalog.create(name, total_seats)
    }

    pub fn get_section(&self, id: SectionId) -> Result<Section, BookingError> {
        self.inner.read().catalog.get(id).cloned()
    }

    /// All sections in creation order; [`BookingError::NoSections`] when the
    /// catalog is empty.
    pub fn list_sections(&self) -> Result<Vec<Section>, BookingError> {
        self.inner.read().catalog.list()
    }

    /// Renames and optionally resizes a section.
    ///
    /// A resize recomputes `available_seats` from the current assignment
    /// count. Shrinking is refused with [`BookingError::SeatsStillBooked`]
    /// when the new capacity is below the number of allocated seats, or when
    /// an occupied seat number would fall outside the new pool.
    pub fn update_section(
        &self,
        id: SectionId,
        name: &str,
        total_seats: Option<u32>,
    ) -> Result<Section, BookingError> {
        let name = catalog::validate_name(name)?;
        let mut reg = self.inner.write();
        reg.catalog.get(id)?;
        if reg.catalog.name_in_use(&name, Some(id)) {
            return Err(BookingError::SectionNameTaken);
        }

        if let Some(new_total) = total_seats {
            if new_total == 0 {
                return Err(BookingError::InvalidCapacity);
            }
            let allocated = reg.seats.allocated_in(id);
            if new_total < allocated {
                return Err(BookingError::SeatsStillBooked);
            }
            // The pool is 1..=total, so an occupied seat beyond the new
            // capacity also blocks the shrink even when the count fits.
            if let Some(highest) = reg.seats.highest_occupied(id) {
                if highest.0 > new_total {
                    return Err(BookingError::SeatsStillBooked);
                }
            }
            let section = reg.catalog.get_mut(id)?;
            section.total_seats = new_total;
            section.available_seats = new_total - allocated;
        }

        let section = reg.catalog.get_mut(id)?;
        section.name = name;
        section.modified_at = Utc::now();
        let updated = section.clone();

        reg.assert_invariants();
        Ok(updated)
    }

    /// Removes a section. Blocked while any of its seats is allocated.
    pub fn delete_section(&self, id: SectionId) -> Result<(), BookingError> {
        let mut reg = self.inner.write();
        reg.catalog.get(id)?;
        if reg.seats.allocated_in(id) > 0 {
            return Err(BookingError::SeatsStillBooked);
        }
        reg.catalog.remove(id)
    }

    // === Tickets ===

    /// Sells a ticket: picks the first section with room in creation order,
    /// then the lowest free seat number within it.
    ///
    /// # Errors
    ///
    /// - [`BookingError::MissingField`] / [`BookingError::SameStops`] /
    ///   [`BookingError::NegativePrice`] - malformed input.
    /// - [`BookingError::UserNotFound`] - unknown user id.
    /// - [`BookingError::TicketAlreadyBooked`] - the user already holds a
    ///   ticket.
    /// - [`BookingError::SoldOut`] - no section has an available seat.
    pub fn purchase_ticket(
        &self,
        from: &str,
        to: &str,
        user_id: UserId,
        price_paid: Decimal,
    ) -> Result<Ticket, BookingError> {
        let from = from.trim();
        if from.is_empty() {
            return Err(BookingError::MissingField("origin stop"));
        }
        let to = to.trim();
        if to.is_empty() {
            return Err(BookingError::MissingField("destination stop"));
        }
        if from == to {
            return Err(BookingError::SameStops);
        }
        if price_paid < Decimal::ZERO {
            return Err(BookingError::NegativePrice);
        }

        let mut reg = self.inner.write();
        if !reg.directory.contains(user_id) {
            return Err(BookingError::UserNotFound);
        }
        if reg.tickets.contains_key(&user_id) {
            return Err(BookingError::TicketAlreadyBooked);
        }

        // Seat search and seat commit stay inside the same critical section;
        // releasing the lock between them is what would let two purchases
        // claim the last seat.
        let (section_id, total_seats) = reg
            .catalog
            .iter()
            .find(|s| s.available_seats > 0)
            .map(|s| (s.id, s.total_seats))
            .ok_or(BookingError::SoldOut)?;
        let seat = reg
            .seats
            .first_free(section_id, total_seats)
            // Conservation guarantees a free seat whenever available > 0.
            .ok_or(BookingError::SoldOut)?;

        let now = Utc::now();
        let ticket = Ticket {
            id: TicketId::new(),
            from_stop: from.to_owned(),
            to_stop: to.to_owned(),
            user_id,
            price_paid,
            section_id,
            seat,
            created_at: now,
            modified_at: now,
        };
        reg.catalog.get_mut(section_id)?.available_seats -= 1;
        reg.seats.assign(section_id, seat, user_id);
        reg.tickets.insert(user_id, ticket.clone());

        reg.assert_invariants();
        Ok(ticket)
    }

    /// The user's ticket joined with their profile.
    pub fn view_receipt(&self, user_id: UserId) -> Result<Receipt, BookingError> {
        let reg = self.inner.read();
        let user = reg.directory.get(user_id)?.clone();
        let ticket = reg
            .tickets
            .get(&user_id)
            .cloned()
            .ok_or(BookingError::TicketNotFound)?;
        Ok(Receipt { user, ticket })
    }

    /// Everyone seated in the given section, in ascending seat order.
    /// A section with no assignments reports
    /// [`BookingError::NoSeatsAllocated`].
    pub fn seats_by_section(
        &self,
        section_id: SectionId,
    ) -> Result<Vec<SeatDetail>, BookingError> {
        let reg = self.inner.read();
        reg.catalog.get(section_id)?;

        let mut details = Vec::new();
        for (seat, user_id) in reg.seats.section_entries(section_id) {
            // Holding a ticket blocks user deletion, so the join never dangles.
            let user = reg.directory.get(user_id)?;
            details.push(SeatDetail {
                seat,
                user_id,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.clone(),
            });
        }
        if details.is_empty() {
            return Err(BookingError::NoSeatsAllocated);
        }
        Ok(details)
    }

    /// Cancels the user's ticket, freeing its seat and returning the seat to
    /// the section's available count.
    pub fn cancel_ticket(&self, user_id: UserId) -> Result<(), BookingError> {
        let mut reg = self.inner.write();
        let ticket = reg
            .tickets
            .remove(&user_id)
            .ok_or(BookingError::TicketNotFound)?;
        reg.seats.release(ticket.section_id, ticket.seat);
        reg.catalog.get_mut(ticket.section_id)?.available_seats += 1;

        reg.assert_invariants();
        Ok(())
    }

    /// Moves the user's ticket to a specific seat, possibly in another
    /// section. Reassigning a user to the seat they already occupy is a
    /// no-op success.
    ///
    /// # Errors
    ///
    /// - [`BookingError::InvalidSeatNumber`] - seat number below 1.
    /// - [`BookingError::TicketNotFound`] - user holds no ticket.
    /// - [`BookingError::SectionNotFound`] - unknown target section.
    /// - [`BookingError::SeatOutOfRange`] - seat beyond the target section's
    ///   capacity.
    /// - [`BookingError::SeatTaken`] - seat assigned to a different user.
    pub fn modify_seat(
        &self,
        user_id: UserId,
        section_id: SectionId,
        seat: SeatNumber,
    ) -> Result<Ticket, BookingError> {
        if seat.0 < 1 {
            return Err(BookingError::InvalidSeatNumber);
        }

        let mut reg = self.inner.write();
        let (current_section, current_seat) = {
            let ticket = reg
                .tickets
                .get(&user_id)
                .ok_or(BookingError::TicketNotFound)?;
            (ticket.section_id, ticket.seat)
        };
        let total_seats = reg.catalog.get(section_id)?.total_seats;
        if seat.0 > total_seats {
            return Err(BookingError::SeatOutOfRange(seat));
        }

        match reg.seats.occupant(section_id, seat) {
            // Already sitting there; nothing to change.
            Some(occupant) if occupant == user_id => {
                let ticket = reg
                    .tickets
                    .get(&user_id)
                    .ok_or(BookingError::TicketNotFound)?;
                return Ok(ticket.clone());
            }
            Some(_) => return Err(BookingError::SeatTaken),
            None => {}
        }

        reg.seats.release(current_section, current_seat);
        reg.seats.assign(section_id, seat, user_id);
        if current_section != section_id {
            // The old section keeps existing while its seats are allocated,
            // so both counter updates are infallible here.
            reg.catalog.get_mut(current_section)?.available_seats += 1;
            reg.catalog.get_mut(section_id)?.available_seats -= 1;
        }

        let ticket = reg
            .tickets
            .get_mut(&user_id)
            .ok_or(BookingError::TicketNotFound)?;
        ticket.section_id = section_id;
        ticket.seat = seat;
        ticket.modified_at = Utc::now();
        let updated = ticket.clone();

        reg.assert_invariants();
        Ok(updated)
    }
}
