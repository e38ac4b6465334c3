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

//! Error types for booking operations.
//!
//! Every failure falls into one of four categories (see [`ErrorKind`]):
//! validation, not-found, conflict, capacity. The category is what a
//! transport maps to a wire-level status; the variant carries the
//! user-facing message. No error is retried internally and no operation
//! partially commits on failure.

use crate::base::SeatNumber;
use thiserror::Error;

/// Booking operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A required text field is empty after trimming
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    /// Email does not match the accepted `local@domain.tld` pattern
    #[error("invalid email address")]
    InvalidEmail,

    /// Ticket price is negative
    #[error("price paid must not be negative")]
    NegativePrice,

    /// Origin and destination stops are the same
    #[error("origin and destination stops must differ")]
    SameStops,

    /// Section capacity is zero
    #[error("section must have at least one seat")]
    InvalidCapacity,

    /// Seat numbers start at 1
    #[error("seat numbers start at 1")]
    InvalidSeatNumber,

    /// Seat number exceeds the section's capacity
    #[error("seat {0} does not exist in this section")]
    SeatOutOfRange(SeatNumber),

    /// Email already belongs to another user (case-insensitive)
    #[error("email already used")]
    EmailTaken,

    /// Section name already in use (case-insensitive)
    #[error("section name already used")]
    SectionNameTaken,

    /// User already holds an active ticket
    #[error("ticket already booked")]
    TicketAlreadyBooked,

    /// Target seat is assigned to a different user
    #[error("seat already taken")]
    SeatTaken,

    /// User still holds a ticket and cannot be deleted
    #[error("user still holds a ticket, cancel it first")]
    UserHasTicket,

    /// Section has booked seats that block the requested change
    #[error("seats already booked")]
    SeatsStillBooked,

    /// Referenced user id does not exist
    #[error("invalid user")]
    UserNotFound,

    /// Referenced section id does not exist
    #[error("section not found")]
    SectionNotFound,

    /// User holds no active ticket
    #[error("no ticket found for this user")]
    TicketNotFound,

    /// User registry is empty
    #[error("users not found")]
    NoUsers,

    /// Section registry is empty
    #[error("sections not found")]
    NoSections,

    /// Section has no allocated seats
    #[error("no seats allocated in this section")]
    NoSeatsAllocated,

    /// No section has an available seat
    #[error("all seats booked")]
    SoldOut,
}

/// Coarse failure category, used by transports to pick a status signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input; never retryable without changing input.
    Validation,
    /// Referenced entity does not exist (or a query matched nothing).
    NotFound,
    /// Uniqueness or state-precondition violation.
    Conflict,
    /// No seats available system-wide.
    Capacity,
}

impl BookingError {
    /// Returns the failure category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_)
            | Self::InvalidEmail
            | Self::NegativePrice
            | Self::SameStops
            | Self::InvalidCapacity
            | Self::InvalidSeatNumber
            | Self::SeatOutOfRange(_) => ErrorKind::Validation,
            Self::EmailTaken
            | Self::SectionNameTaken
            | Self::TicketAlreadyBooked
            | Self::SeatTaken
            | Self::UserHasTicket
            | Self::SeatsStillBooked => ErrorKind::Conflict,
            Self::UserNotFound
            | Self::SectionNotFound
            | Self::TicketNotFound
            | Self::NoUsers
            | Self::NoSections
            | Self::NoSeatsAllocated => ErrorKind::NotFound,
            Self::SoldOut => ErrorKind::Capacity,
        }
    }
}
