//! System API endpoints.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
    pub tmdb_configured: bool,
    pub database: bool,
}

/// Returns service status.
///
/// # Endpoint
/// `GET /api/system/status`
pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database = state.shared.store.ping().await.is_ok();
    let active_sessions = state.sessions.read().await.len();

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions,
        tmdb_configured: state.shared.tmdb.has_credentials(),
        database,
    })))
}
