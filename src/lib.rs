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

//! # Ticketbook
//!
//! This library provides an in-memory train ticketing engine: it registers
//! users, defines seating sections, sells tickets against available seats,
//! and supports seat reassignment and cancellation, guaranteeing that no
//! seat is ever double-booked.
//!
//! ## Core Components
//!
//! - [`BookingEngine`]: central engine owning all registries and the seat map
//! - [`User`]: registered rider, unique by email
//! - [`Section`]: named seat pool with capacity and availability counters
//! - [`Ticket`]: active booking tying a user to one seat in one section
//! - [`BookingError`]: typed failures, categorized by [`ErrorKind`]
//!
//! ## Example
//!
//! ```
//! use ticketbook_rs::{BookingEngine, SeatNumber};
//! use rust_decimal_macros::dec;
//!
//! let engine = BookingEngine::new();
//! let section = engine.create_section("A", 10).unwrap();
//! let user = engine.create_user("Ada", "Lovelace", "ada@example.com").unwrap();
//!
//! // The lowest free seat in the first section with room.
//! let ticket = engine.purchase_ticket("London", "Paris", user.id, dec!(20.00)).unwrap();
//! assert_eq!(ticket.section_id, section.id);
//! assert_eq!(ticket.seat, SeatNumber(1));
//!
//! // Cancelling returns the seat to the pool.
//! engine.cancel_ticket(user.id).unwrap();
//! assert_eq!(engine.get_section(section.id).unwrap().available_seats, 10);
//! ```
//!
//! ## Thread Safety
//!
//! All registries sit behind a single reader-writer lock; every mutating
//! operation is one critical section, so the invariants above hold under
//! concurrent access. State is process-lifetime only: nothing is persisted.

pub mod base;
mod catalog;
mod directory;
mod engine;
pub mod error;
mod seat_map;
mod ticket;

pub use base::{SeatNumber, SectionId, TicketId, UserId};
pub use catalog::Section;
pub use directory::User;
pub use engine::BookingEngine;
pub use error::{BookingError, ErrorKind};
pub use ticket::{Receipt, SeatDetail, Ticket};
