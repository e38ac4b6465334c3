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

//! Ticket records and the read-side views derived from them.
//!
//! A ticket is either absent or active: purchase creates it, cancellation
//! destroys it, and seat reassignment rewrites its `(section, seat)` pair in
//! place. There is no pending or expired state.

use crate::base::{SeatNumber, SectionId, TicketId, UserId};
use crate::directory::User;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// An active ticket: one per user, one seat per ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub from_stop: String,
    pub to_stop: String,
    pub user_id: UserId,
    pub price_paid: Decimal,
    pub section_id: SectionId,
    pub seat: SeatNumber,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// A user's ticket joined with their profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub user: User,
    pub ticket: Ticket,
}

/// One seat-assignment entry joined with the occupant's identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatDetail {
    pub seat: SeatNumber,
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
