use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{AppSettings, BookingStatus, Room};
use crate::services::gateway::{RoomPayload, SettingsPayload, StatusUpdate};
use crate::services::lifecycle;
use crate::services::reporting::{self, AccountingSummary, DayOccupancy};
use crate::state::{AppState, SyncGuard};

use super::session::bearer_token;

fn check_admin(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let token = bearer_token(headers).ok_or(AppError::Unauthorized)?;
    let sessions = state.sessions.lock().unwrap();
    match sessions.get(&token) {
        Some(view) if view.is_admin => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

// POST /api/admin/bookings/:id/approve
pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&state, &headers)?;

    let room_id = {
        let store = state.store.lock().unwrap();
        lifecycle::decision_guard(&store, booking_id)?
    };

    {
        let _sync = SyncGuard::begin(&state);
        state
            .gateway
            .update_booking_status(booking_id, StatusUpdate::Confirmed)
            .await?;
    }

    let mut store = state.store.lock().unwrap();
    store.update_booking_status(room_id, booking_id, BookingStatus::Confirmed);
    tracing::info!(booking_id, room_id, "booking approved");

    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/admin/bookings/:id/decline
/// Declined requests are removed outright; they leave no trace in the active
/// booking list.
pub async fn decline_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&state, &headers)?;

    let room_id = {
        let store = state.store.lock().unwrap();
        lifecycle::decision_guard(&store, booking_id)?
    };

    {
        let _sync = SyncGuard::begin(&state);
        state
            .gateway
            .update_booking_status(booking_id, StatusUpdate::Declined)
            .await?;
    }

    let mut store = state.store.lock().unwrap();
    store.remove_booking_from_room(room_id, booking_id);
    tracing::info!(booking_id, room_id, "booking declined and removed");

    Ok(Json(serde_json::json!({"ok": true})))
}

// POST /api/admin/rooms
/// Create (no id) or update (id present). The backend-confirmed room is what
/// lands in the catalog.
pub async fn save_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<RoomPayload>,
) -> Result<Json<Room>, AppError> {
    check_admin(&state, &headers)?;

    // Same validation the catalog applies, run before anything leaves the
    // process.
    let draft = Room {
        id: payload.id.unwrap_or_default(),
        name: payload.name.clone(),
        description: payload.description.clone(),
        price_per_night: payload.price_per_night,
        max_guests: payload.max_guests,
        images: payload.images.clone(),
        amenities: payload.amenities.clone(),
        bookings: vec![],
    };
    draft.validate().map_err(AppError::InvalidInput)?;

    if let Some(id) = payload.id {
        let store = state.store.lock().unwrap();
        if store.room_by_id(id).is_none() {
            return Err(AppError::NotFound(format!("room {id}")));
        }
    }

    let saved = {
        let _sync = SyncGuard::begin(&state);
        state.gateway.save_room(&payload).await?
    };

    let mut store = state.store.lock().unwrap();
    store.upsert_room(saved.clone());
    tracing::info!(room_id = saved.id, "room saved");

    Ok(Json(saved))
}

// DELETE /api/admin/rooms/:id
pub async fn delete_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&state, &headers)?;

    {
        let store = state.store.lock().unwrap();
        if store.room_by_id(room_id).is_none() {
            return Err(AppError::NotFound(format!("room {room_id}")));
        }
    }

    {
        let _sync = SyncGuard::begin(&state);
        state.gateway.delete_room(room_id).await?;
    }

    let mut store = state.store.lock().unwrap();
    store.remove_room(room_id);
    tracing::info!(room_id, "room deleted");

    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/admin/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AppSettings>, AppError> {
    check_admin(&state, &headers)?;
    let store = state.store.lock().unwrap();
    Ok(Json(store.settings().clone()))
}

// POST /api/admin/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<SettingsPayload>,
) -> Result<Json<AppSettings>, AppError> {
    check_admin(&state, &headers)?;

    let updated = {
        let _sync = SyncGuard::begin(&state);
        state.gateway.update_settings(&payload).await?
    };

    let mut store = state.store.lock().unwrap();
    store.set_settings(updated.clone());
    Ok(Json(updated))
}

// GET /api/admin/accounting
pub async fn get_accounting(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AccountingSummary>, AppError> {
    check_admin(&state, &headers)?;
    let store = state.store.lock().unwrap();
    Ok(Json(reporting::accounting_summary(store.rooms())))
}

// GET /api/admin/rooms/:id/occupancy
#[derive(Deserialize)]
pub struct OccupancyQuery {
    pub year: i32,
    pub month: u32,
}

pub async fn get_occupancy(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(room_id): Path<i64>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<Vec<DayOccupancy>>, AppError> {
    check_admin(&state, &headers)?;

    let store = state.store.lock().unwrap();
    let room = store
        .room_by_id(room_id)
        .ok_or_else(|| AppError::NotFound(format!("room {room_id}")))?;

    reporting::month_occupancy(room, query.year, query.month)
        .map(Json)
        .ok_or_else(|| {
            AppError::InvalidInput(format!("invalid month {}-{}", query.year, query.month))
        })
}

// POST /api/admin/amenities/icon
#[derive(Deserialize)]
pub struct IconRequest {
    pub name: String,
}

pub async fn generate_amenity_icon(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<IconRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&state, &headers)?;

    if body.name.trim().is_empty() {
        return Err(AppError::InvalidInput("amenity name is required".to_string()));
    }

    let icon = state
        .icons
        .generate_icon(body.name.trim())
        .await
        .map_err(|e| AppError::Backend(e.to_string()))?;

    Ok(Json(serde_json::json!({ "name": body.name, "icon": icon })))
}
