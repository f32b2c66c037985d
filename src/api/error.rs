use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::constants::FETCH_ERROR_MESSAGE;
use crate::services::TrendingError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    /// Upstream movie fetch failed. The cause is logged, never returned.
    FetchFailed(String),

    ValidationError(String),

    /// A server-side capacity was reached.
    LimitReached(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::FetchFailed(msg) => write!(f, "Movie fetch failed: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::LimitReached(msg) => write!(f, "Limit reached: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::FetchFailed(msg) => {
                tracing::warn!("TMDB fetch error: {}", msg);
                (StatusCode::BAD_GATEWAY, FETCH_ERROR_MESSAGE.to_string())
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::LimitReached(msg) => (StatusCode::TOO_MANY_REQUESTS, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<TrendingError> for ApiError {
    fn from(err: TrendingError) -> Self {
        match err {
            TrendingError::Validation(msg) => Self::validation(msg),
            TrendingError::Database(msg) => Self::DatabaseError(msg),
            TrendingError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl ApiError {
    pub fn session_not_found(id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("Session {} not found", id))
    }

    pub fn session_limit(max: usize) -> Self {
        ApiError::LimitReached(format!("Session limit of {} reached", max))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}
