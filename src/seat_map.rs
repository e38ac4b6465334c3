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

//! Seat-assignment relation.
//!
//! The authoritative record of which user occupies which seat in which
//! section: at most one entry per `(section, seat)` pair, independent of the
//! ticket registry. A `BTreeMap` keyed by that pair makes per-section scans a
//! contiguous range in ascending seat order, which is exactly the order the
//! "first free seat" search must follow.

use crate::base::{SeatNumber, SectionId, UserId};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub(crate) struct SeatMap {
    seats: BTreeMap<(SectionId, SeatNumber), UserId>,
}

impl SeatMap {
    /// Returns the user occupying the given seat, if any.
    pub fn occupant(&self, section: SectionId, seat: SeatNumber) -> Option<UserId> {
        self.seats.get(&(section, seat)).copied()
    }

    /// Records an assignment. The caller must have verified the seat is free.
    pub fn assign(&mut self, section: SectionId, seat: SeatNumber, user: UserId) {
        let previous = self.seats.insert((section, seat), user);
        debug_assert!(previous.is_none(), "seat {seat} in {section} was double-assigned");
    }

    /// Clears an assignment, returning the former occupant.
    pub fn release(&mut self, section: SectionId, seat: SeatNumber) -> Option<UserId> {
        self.seats.remove(&(section, seat))
    }

    /// Lowest free seat number in `1..=total_seats`, or `None` if the section
    /// is full.
    pub fn first_free(&self, section: SectionId, total_seats: u32) -> Option<SeatNumber> {
        let mut occupied = self.section_range(section).map(|((_, seat), _)| *seat);
        let mut next = occupied.next();

        // Occupied seats come back in ascending order, so one merged walk
        // over 1..=total finds the gap without collecting anything.
        for candidate in (1..=total_seats).map(SeatNumber) {
            match next {
                Some(seat) if seat == candidate => next = occupied.next(),
                _ => return Some(candidate),
            }
        }
        None
    }

    /// Number of assignments in the given section.
    pub fn allocated_in(&self, section: SectionId) -> u32 {
        self.section_range(section).count() as u32
    }

    /// Highest occupied seat number in the section, if any seat is taken.
    pub fn highest_occupied(&self, section: SectionId) -> Option<SeatNumber> {
        self.section_range(section)
            .next_back()
            .map(|((_, seat), _)| *seat)
    }

    /// Assignments in the given section, in ascending seat order.
    pub fn section_entries(
        &self,
        section: SectionId,
    ) -> impl DoubleEndedIterator<Item = (SeatNumber, UserId)> + '_ {
        self.section_range(section)
            .map(|((_, seat), user)| (*seat, *user))
    }

    /// Total number of assignments across all sections.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    fn section_range(
        &self,
        section: SectionId,
    ) -> impl DoubleEndedIterator<Item = (&(SectionId, SeatNumber), &UserId)> {
        self.seats
            .range((section, SeatNumber(u32::MIN))..=(section, SeatNumber(u32::MAX)))
    }
}
