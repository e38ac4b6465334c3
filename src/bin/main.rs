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

//! JSON API server for the ticketing engine.
//!
//! The transport stays thin: it decodes requests into the engine's typed
//! arguments, invokes one operation, and maps each failure category to an
//! HTTP status. All bookkeeping rules live in the library.
//!
//! ## Endpoints
//!
//! - `POST /users`, `GET /users`, `GET /users/{id}`, `PUT /users/{id}`,
//!   `DELETE /users/{id}`
//! - `POST /sections`, `GET /sections`, `GET /sections/{id}`,
//!   `PUT /sections/{id}`, `DELETE /sections/{id}`
//! - `GET /sections/{id}/seats` - who sits where in a section
//! - `POST /tickets` - purchase, `GET /tickets/{user_id}` - receipt,
//!   `PUT /tickets/{user_id}/seat` - reassign, `DELETE /tickets/{user_id}` -
//!   cancel
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST http://localhost:3000/users \
//!   -H "Content-Type: application/json" \
//!   -d '{"first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}'
//!
//! curl -X POST http://localhost:3000/sections \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "A", "total_seats": 20}'
//!
//! curl -X POST http://localhost:3000/tickets \
//!   -H "Content-Type: application/json" \
//!   -d '{"from": "London", "to": "Paris", "user_id": "<id>", "price_paid": "20.00"}'
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use ticketbook_rs::{
    BookingEngine, BookingError, ErrorKind, SeatNumber, SectionId, UserId,
};
use tokio::net::TcpListener;
use tracing::info;

/// Ticketbook - in-memory train ticketing over HTTP
///
/// State lives for the lifetime of the process; there is no persistence.
#[derive(Parser, Debug)]
#[command(name = "ticketbook-rs")]
#[command(about = "A train ticketing server with seat allocation", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

// === Request DTOs ===

#[derive(Debug, Deserialize)]
struct UserRequest {
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct CreateSectionRequest {
    name: String,
    total_seats: u32,
}

#[derive(Debug, Deserialize)]
struct UpdateSectionRequest {
    name: String,
    total_seats: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct PurchaseRequest {
    from: String,
    to: String,
    user_id: UserId,
    price_paid: Decimal,
}

#[derive(Debug, Deserialize)]
struct ModifySeatRequest {
    section_id: SectionId,
    seat: u32,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    category: &'static str,
}

// === Application State ===

#[derive(Clone)]
struct AppState {
    engine: Arc<BookingEngine>,
}

// === Error Handling ===

/// Wrapper for converting [`BookingError`] into HTTP responses.
struct AppError(BookingError);

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, category) = match self.0.kind() {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Capacity => (StatusCode::UNPROCESSABLE_ENTITY, "CAPACITY"),
        };

        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
                category,
            }),
        )
            .into_response()
    }
}

// === User Handlers ===

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .engine
        .create_user(&req.first_name, &req.last_name, &req.email)?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.list_users()?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.get_user(id)?))
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .engine
        .update_user(id, &req.first_name, &req.last_name, &req.email)?;
    Ok(Json(user))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    state.engine.delete_user(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// === Section Handlers ===

async fn create_section(
    State(state): State<AppState>,
    Json(req): Json<CreateSectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let section = state.engine.create_section(&req.name, req.total_seats)?;
    Ok((StatusCode::CREATED, Json(section)))
}

async fn list_sections(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.list_sections()?))
}

async fn get_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.get_section(id)?))
}

async fn update_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
    Json(req): Json<UpdateSectionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let section = state
        .engine
        .update_section(id, &req.name, req.total_seats)?;
    Ok(Json(section))
}

async fn delete_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<impl IntoResponse, AppError> {
    state.engine.delete_section(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn seats_by_section(
    State(state): State<AppState>,
    Path(id): Path<SectionId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.seats_by_section(id)?))
}

// === Ticket Handlers ===

async fn purchase_ticket(
    State(state): State<AppState>,
    Json(req): Json<PurchaseRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = state
        .engine
        .purchase_ticket(&req.from, &req.to, req.user_id, req.price_paid)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn view_receipt(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.engine.view_receipt(user_id)?))
}

async fn modify_seat(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(req): Json<ModifySeatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = state
        .engine
        .modify_seat(user_id, req.section_id, SeatNumber(req.seat))?;
    Ok(Json(ticket))
}

async fn cancel_ticket(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, AppError> {
    state.engine.cancel_ticket(user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// === Router ===

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/sections", post(create_section).get(list_sections))
        .route(
            "/sections/{id}",
            get(get_section).put(update_section).delete(delete_section),
        )
        .route("/sections/{id}/seats", get(seats_by_section))
        .route("/tickets", post(purchase_ticket))
        .route(
            "/tickets/{user_id}",
            get(view_receipt).delete(cancel_ticket),
        )
        .route("/tickets/{user_id}/seat", put(modify_seat))
        .with_state(state)
}

// === Main ===

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticketbook_rs=info".into()),
        )
        .init();

    let args = Args::parse();
    let state = AppState {
        engine: Arc::new(BookingEngine::new()),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(args.bind).await?;
    info!(addr = %args.bind, "ticketbook server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
