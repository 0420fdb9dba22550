use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::auth::Credentials;
use crate::state::AppState;
use crate::view::{View, ViewState};

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_string())
}

fn session_token(headers: &HeaderMap) -> Result<String, AppError> {
    bearer_token(headers).ok_or(AppError::Unauthorized)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    #[serde(flatten)]
    pub state: ViewState,
}

// POST /api/session
/// Opens an anonymous browsing session.
pub async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let token = uuid::Uuid::new_v4().to_string();
    let view = ViewState::default();
    state
        .sessions
        .lock()
        .unwrap()
        .insert(token.clone(), view.clone());
    Json(SessionResponse { token, state: view })
}

// GET /api/session
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ViewState>, AppError> {
    let token = session_token(&headers)?;
    let sessions = state.sessions.lock().unwrap();
    sessions
        .get(&token)
        .cloned()
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

// POST /api/session/navigate
#[derive(Deserialize)]
pub struct NavigateRequest {
    pub view: View,
}

pub async fn navigate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<NavigateRequest>,
) -> Result<Json<ViewState>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.lock().unwrap();
    let view = sessions.get_mut(&token).ok_or(AppError::Unauthorized)?;
    view.navigate(body.view);
    Ok(Json(view.clone()))
}

// POST /api/session/select-room
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRoomRequest {
    pub room_id: i64,
}

pub async fn select_room(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<SelectRoomRequest>,
) -> Result<Json<ViewState>, AppError> {
    let token = session_token(&headers)?;

    {
        let store = state.store.lock().unwrap();
        if store.room_by_id(body.room_id).is_none() {
            return Err(AppError::NotFound(format!("room {}", body.room_id)));
        }
    }

    let mut sessions = state.sessions.lock().unwrap();
    let view = sessions.get_mut(&token).ok_or(AppError::Unauthorized)?;
    view.select_room(body.room_id);
    Ok(Json(view.clone()))
}

// POST /api/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticates through the pluggable authenticator and opens an admin
/// session. The credential check itself is a placeholder, not real auth.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .auth
        .authenticate(&Credentials {
            username: body.username,
            password: body.password,
        })
        .map_err(|_| AppError::Unauthorized)?;

    let mut view = ViewState::default();
    view.login();

    state
        .sessions
        .lock()
        .unwrap()
        .insert(session.token.clone(), view.clone());

    tracing::info!("admin logged in");

    Ok(Json(SessionResponse {
        token: session.token,
        state: view,
    }))
}

// POST /api/logout
/// Drops the admin flag but keeps the session for continued browsing.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ViewState>, AppError> {
    let token = session_token(&headers)?;
    let mut sessions = state.sessions.lock().unwrap();
    let view = sessions.get_mut(&token).ok_or(AppError::Unauthorized)?;
    view.logout();
    Ok(Json(view.clone()))
}
