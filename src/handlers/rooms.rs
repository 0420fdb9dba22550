use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::availability;
use crate::models::{AppSettings, Booking, EncodedFile, Room};
use crate::services::lifecycle::{self, BookingRequest};
use crate::state::{AppState, SyncGuard};

// GET /api/rooms
#[derive(Deserialize)]
pub struct BrowseQuery {
    pub checkin: Option<String>,
    pub checkout: Option<String>,
    pub guests: Option<u32>,
}

/// Browse/search. An absent or unparseable date disables the availability
/// filter entirely, matching the home page's behavior.
pub async fn list_rooms(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BrowseQuery>,
) -> Json<Vec<Room>> {
    let checkin = query
        .checkin
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    let checkout = query
        .checkout
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
    let guests = query.guests.unwrap_or(1);

    let store = state.store.lock().unwrap();
    Json(availability::filter_available(
        store.rooms(),
        checkin,
        checkout,
        guests,
    ))
}

// GET /api/rooms/:id
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Room>, AppError> {
    let store = state.store.lock().unwrap();
    store
        .room_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("room {id}")))
}

// POST /api/rooms/:id/bookings
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequestBody {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub payment_screenshot: Option<EncodedFile>,
    pub comments: Option<String>,
}

/// Guest booking request. Validation happens against the local catalog; the
/// write goes to the backend first and only its authoritative booking (with
/// the server-assigned id) lands in the store.
pub async fn request_booking(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<i64>,
    Json(body): Json<BookingRequestBody>,
) -> Result<Json<Booking>, AppError> {
    let request = BookingRequest {
        name: body.name,
        email: body.email,
        phone: body.phone,
        checkin: body.checkin,
        checkout: body.checkout,
        payment_screenshot: body.payment_screenshot,
        comments: body.comments,
    };

    let intent = {
        let store = state.store.lock().unwrap();
        let room = store
            .room_by_id(room_id)
            .ok_or_else(|| AppError::NotFound(format!("room {room_id}")))?;
        lifecycle::prepare_request(room, &request)?
    };

    let booking = {
        let _sync = SyncGuard::begin(&state);
        state.gateway.add_booking(&intent).await?
    };

    tracing::info!(
        booking_id = booking.id,
        room_id,
        total = booking.total_amount,
        "booking requested"
    );

    let mut store = state.store.lock().unwrap();
    store.upsert_booking_on_room(room_id, booking.clone());
    Ok(Json(booking))
}

// GET /api/settings
pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<AppSettings> {
    let store = state.store.lock().unwrap();
    Json(store.settings().clone())
}

// POST /api/refresh
/// Refetches the whole catalog and settings from the backend and swaps them
/// in. Either fetch failing leaves the current cache untouched.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Room>>, AppError> {
    let (rooms, settings) = {
        let _sync = SyncGuard::begin(&state);
        let rooms = state.gateway.get_rooms().await?;
        let settings = state.gateway.get_settings().await?;
        (rooms, settings)
    };

    let mut store = state.store.lock().unwrap();
    store.replace_rooms(rooms);
    store.set_settings(settings);
    Ok(Json(store.rooms().to_vec()))
}
