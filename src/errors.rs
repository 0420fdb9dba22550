use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("check-out date must be after check-in date")]
    InvalidRange,

    #[error("these dates are not available")]
    DateConflict,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidRange => "invalid_range",
            AppError::DateConflict => "date_conflict",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Transport(_) => "transport",
            AppError::Backend(_) => "backend",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized => "unauthorized",
        }
    }
}

impl From<crate::services::gateway::GatewayError> for AppError {
    fn from(err: crate::services::gateway::GatewayError) -> Self {
        match err {
            crate::services::gateway::GatewayError::Transport(msg) => AppError::Transport(msg),
            crate::services::gateway::GatewayError::Backend(msg) => AppError::Backend(msg),
        }
    }
}

impl From<crate::models::availability::AvailabilityError> for AppError {
    fn from(err: crate::models::availability::AvailabilityError) -> Self {
        match err {
            crate::models::availability::AvailabilityError::InvalidRange => AppError::InvalidRange,
            crate::models::availability::AvailabilityError::InvalidInput(msg) => {
                AppError::InvalidInput(msg)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRange => StatusCode::BAD_REQUEST,
            AppError::DateConflict => StatusCode::CONFLICT,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Backend(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string(), "kind": self.kind() });
        (status, axum::Json(body)).into_response()
    }
}
