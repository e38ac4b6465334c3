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

//! User registry public API integration tests.

use rust_decimal_macros::dec;
use ticketbook_rs::{BookingEngine, BookingError, UserId};

#[test]
fn create_user_assigns_id_and_timestamps() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.created_at, user.modified_at);
}

#[test]
fn create_user_trims_fields() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("  Ada ", " Lovelace  ", "  ada@example.com ")
        .unwrap();

    assert_eq!(user.first_name, "Ada");
    assert_eq!(user.last_name, "Lovelace");
    assert_eq!(user.email, "ada@example.com");
}

#[test]
fn empty_fields_are_rejected() {
    let engine = BookingEngine::new();

    assert_eq!(
        engine.create_user("", "Lovelace", "ada@example.com"),
        Err(BookingError::MissingField("first name"))
    );
    assert_eq!(
        engine.create_user("Ada", "   ", "ada@example.com"),
        Err(BookingError::MissingField("last name"))
    );
    assert_eq!(
        engine.create_user("Ada", "Lovelace", ""),
        Err(BookingError::MissingField("email"))
    );
}

#[test]
fn malformed_email_is_rejected() {
    let engine = BookingEngine::new();
    let result = engine.create_user("Ada", "Lovelace", "bad@@x");
    assert_eq!(result, Err(BookingError::InvalidEmail));
}

#[test]
fn duplicate_email_differing_only_in_case_conflicts() {
    let engine = BookingEngine::new();
    engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    let result = engine.create_user("Grace", "Hopper", "ADA@EXAMPLE.COM");
    assert_eq!(result, Err(BookingError::EmailTaken));
}

#[test]
fn get_user_returns_stored_record() {
    let engine = BookingEngine::new();
    let created = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    let fetched = engine.get_user(created.id).unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.email, "ada@example.com");
}

#[test]
fn get_unknown_user_fails() {
    let engine = BookingEngine::new();
    let result = engine.get_user(UserId::new());
    assert!(matches!(result, Err(BookingError::UserNotFound)));
}

#[test]
fn list_users_on_empty_registry_is_an_error() {
    let engine = BookingEngine::new();
    assert!(matches!(engine.list_users(), Err(BookingError::NoUsers)));
}

#[test]
fn list_users_returns_everyone() {
    let engine = BookingEngine::new();
    engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();
    engine
        .create_user("Grace", "Hopper", "grace@example.com")
        .unwrap();

    let users = engine.list_users().unwrap();
    assert_eq!(users.len(), 2);
}

#[test]
fn update_user_refreshes_modified_at_only() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    let updated = engine
        .update_user(user.id, "Ada", "King", "ada.king@example.com")
        .unwrap();

    assert_eq!(updated.id, user.id);
    assert_eq!(updated.created_at, user.created_at);
    assert_eq!(updated.last_name, "King");
    assert_eq!(updated.email, "ada.king@example.com");
    assert!(updated.modified_at >= updated.created_at);
}

#[test]
fn update_unknown_user_fails() {
    let engine = BookingEngine::new();
    let result = engine.update_user(UserId::new(), "Ada", "Lovelace", "ada@example.com");
    assert!(matches!(result, Err(BookingError::UserNotFound)));
}

#[test]
fn update_to_another_users_email_conflicts() {
    let engine = BookingEngine::new();
    engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();
    let grace = engine
        .create_user("Grace", "Hopper", "grace@example.com")
        .unwrap();

    let result = engine.update_user(grace.id, "Grace", "Hopper", "Ada@Example.com");
    assert!(matches!(result, Err(BookingError::EmailTaken)));
}

#[test]
fn update_keeping_own_email_succeeds() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    engine
        .update_user(user.id, "Augusta", "Lovelace", "ada@example.com")
        .unwrap();
}

#[test]
fn delete_user_removes_record() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();

    engine.delete_user(user.id).unwrap();
    assert!(matches!(
        engine.get_user(user.id),
        Err(BookingError::UserNotFound)
    ));
}

#[test]
fn delete_unknown_user_fails() {
    let engine = BookingEngine::new();
    assert_eq!(engine.delete_user(UserId::new()), Err(BookingError::UserNotFound));
}

#[test]
fn delete_is_blocked_while_user_holds_a_ticket() {
    let engine = BookingEngine::new();
    engine.create_section("A", 2).unwrap();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();
    engine
        .purchase_ticket("London", "Paris", user.id, dec!(10.00))
        .unwrap();

    assert_eq!(engine.delete_user(user.id), Err(BookingError::UserHasTicket));

    // After cancelling, deletion goes through.
    engine.cancel_ticket(user.id).unwrap();
    engine.delete_user(user.id).unwrap();
}

#[test]
fn deleted_users_email_can_be_reused() {
    let engine = BookingEngine::new();
    let user = engine
        .create_user("Ada", "Lovelace", "ada@example.com")
        .unwrap();
    engine.delete_user(user.id).unwrap();

    engine
        .create_user("Ada", "King", "ada@example.com")
        .unwrap();
}
