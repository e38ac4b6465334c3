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

//! User registry.
//!
//! The directory owns all [`User`] records. Identity is the opaque
//! [`UserId`]; email is unique across all users under trimmed,
//! case-insensitive comparison. Ticket-related preconditions (a user cannot
//! be deleted while holding a ticket) live in the engine, which owns the
//! ticket registry.

use crate::base::UserId;
use crate::error::BookingError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Accepted address shape: letters/digits/`._%+-` in the local part,
/// letters/digits/`.-` in the domain, a TLD of at least two letters.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// A registered rider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// In-memory user registry.
///
/// `BTreeMap` keeps listing order stable across identical histories.
#[derive(Debug, Default)]
pub(crate) struct Directory {
    users: BTreeMap<UserId, User>,
}

impl Directory {
    /// Registers a new user with a fresh id and current timestamps.
    pub fn create(&mut self, first: &str, last: &str, email: &str) -> Result<User, BookingError> {
        let (first, last, email) = validate_profile(first, last, email)?;
        if self.email_in_use(&email, None) {
            return Err(BookingError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: first,
            last_name: last,
            email,
            created_at: now,
            modified_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> Result<&User, BookingError> {
        self.users.get(&id).ok_or(BookingError::UserNotFound)
    }

    /// Returns all users; an empty registry is reported as an error, not an
    /// empty list.
    pub fn list(&self) -> Result<Vec<User>, BookingError> {
        if self.users.is_empty() {
            return Err(BookingError::NoUsers);
        }
        Ok(self.users.values().cloned().collect())
    }

    /// Rewrites a user's profile in place. Id and `created_at` are immutable;
    /// `modified_at` is refreshed.
    pub fn update(
        &mut self,
        id: UserId,
        first: &str,
        last: &str,
        email: &str,
    ) -> Result<User, BookingError> {
        let (first, last, email) = validate_profile(first, last, email)?;
        if !self.users.contains_key(&id) {
            return Err(BookingError::UserNotFound);
        }
        if self.email_in_use(&email, Some(id)) {
            return Err(BookingError::EmailTaken);
        }

        let user = self.users.get_mut(&id).ok_or(BookingError::UserNotFound)?;
        user.first_name = first;
        user.last_name = last;
        user.email = email;
        user.modified_at = Utc::now();
        Ok(user.clone())
    }

    pub fn remove(&mut self, id: UserId) -> Result<(), BookingError> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or(BookingError::UserNotFound)
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.contains_key(&id)
    }

    fn email_in_use(&self, email: &str, exclude: Option<UserId>) -> bool {
        let needle = email.to_lowercase();
        self.users
            .values()
            .any(|u| Some(u.id) != exclude && u.email.to_lowercase() == needle)
    }
}

/// Trims and validates the three profile fields, returning owned copies.
fn validate_profile(
    first: &str,
    last: &str,
    email: &str,
) -> Result<(String, String, String), BookingError> {
    let first = first.trim();
    if first.is_empty() {
        return Err(BookingError::MissingField("first name"));
    }
    let last = last.trim();
    if last.is_empty() {
        return Err(BookingError::MissingField("last name"));
    }
    let email = email.trim();
    if email.is_empty() {
        return Err(BookingError::MissingField("email"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(BookingError::InvalidEmail);
    }
    Ok((first.to_owned(), last.to_owned(), email.to_owned()))
}
