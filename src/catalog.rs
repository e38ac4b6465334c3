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

//! Seating section catalog.
//!
//! Owns all [`Section`] records and their seat pools. Sections are stored in
//! creation order, which is the enumeration order the allocation engine uses
//! when it picks the first section with room; a hash map's unspecified
//! iteration order would make seat assignment non-deterministic.

use crate::base::SectionId;
use crate::error::BookingError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A named pool of seats with fixed total capacity.
///
/// Invariant: `0 <= available_seats <= total_seats` at all times. The seat
/// pool is the number range `1..=total_seats`; which of those seats are taken
/// is recorded in the engine's seat map, and `available_seats` is kept equal
/// to `total_seats` minus the number of assignments in this section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub total_seats: u32,
    pub available_seats: u32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// In-memory section catalog, in creation order.
#[derive(Debug, Default)]
pub(crate) struct SectionCatalog {
    sections: Vec<Section>,
}

impl SectionCatalog {
    /// Adds a section with all seats available.
    pub fn create(&mut self, name: &str, total_seats: u32) -> Result<Section, BookingError> {
        let name = validate_name(name)?;
        if total_seats == 0 {
            return Err(BookingError::InvalidCapacity);
        }
        if self.name_in_use(&name, None) {
            return Err(BookingError::SectionNameTaken);
        }

        let now = Utc::now();
        let section = Section {
            id: SectionId::new(),
            name,
            total_seats,
            available_seats: total_seats,
            created_at: now,
            modified_at: now,
        };
        self.sections.push(section.clone());
        Ok(section)
    }

    pub fn get(&self, id: SectionId) -> Result<&Section, BookingError> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .ok_or(BookingError::SectionNotFound)
    }

    pub fn get_mut(&mut self, id: SectionId) -> Result<&mut Section, BookingError> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(BookingError::SectionNotFound)
    }

    /// Returns all sections; an empty catalog is reported as an error.
    pub fn list(&self) -> Result<Vec<Section>, BookingError> {
        if self.sections.is_empty() {
            return Err(BookingError::NoSections);
        }
        Ok(self.sections.clone())
    }

    /// Sections in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn remove(&mut self, id: SectionId) -> Result<(), BookingError> {
        let position = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or(BookingError::SectionNotFound)?;
        self.sections.remove(position);
        Ok(())
    }

    pub fn name_in_use(&self, name: &str, exclude: Option<SectionId>) -> bool {
        let needle = name.to_lowercase();
        self.sections
            .iter()
            .any(|s| Some(s.id) != exclude && s.name.to_lowercase() == needle)
    }
}

/// Trims and validates a section name.
pub(crate) fn validate_name(name: &str) -> Result<String, BookingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BookingError::MissingField("section name"));
    }
    Ok(name.to_owned())
}
