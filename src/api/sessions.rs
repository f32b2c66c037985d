//! Server-side search sessions.
//!
//! Each session is one mounted page: the client pushes raw input with
//! `PUT /term` and follows state through the SSE stream.

use axum::{
    Json,
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tracing::{info, warn};
use uuid::Uuid;

use crate::constants::limits::SSE_KEEP_ALIVE_SECS;
use crate::services::SearchSession;

use super::{
    ApiError, ApiResponse, AppState, RefreshDto, SessionCreatedDto, SessionDto, TermRequest,
};

async fn find_session(state: &AppState, id: Uuid) -> Result<Arc<SearchSession>, ApiError> {
    state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::session_not_found(id))
}

/// `POST /api/sessions`
///
/// Refused with 429 once `server.max_sessions` sessions are mounted.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SessionCreatedDto>>, ApiError> {
    let max = state.config().server.max_sessions;
    let id = Uuid::new_v4();

    let active = {
        let mut sessions = state.sessions.write().await;
        if sessions.len() >= max {
            warn!(max, "Session limit reached");
            return Err(ApiError::session_limit(max));
        }
        sessions.insert(id, Arc::new(state.shared.mount_session()));
        sessions.len()
    };

    info!(session_id = %id, active, "Session mounted");
    Ok(Json(ApiResponse::success(SessionCreatedDto { id })))
}

/// `GET /api/sessions/{id}`
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = find_session(&state, id).await?;
    Ok(Json(ApiResponse::success(SessionDto::new(
        id,
        session.snapshot(),
    ))))
}

/// `PUT /api/sessions/{id}/term`
pub async fn set_term(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<TermRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = find_session(&state, id).await?;
    session.set_search_term(request.term);
    Ok(Json(ApiResponse::success(SessionDto::new(
        id,
        session.snapshot(),
    ))))
}

/// `POST /api/sessions/{id}/refresh`
pub async fn refresh_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RefreshDto>>, ApiError> {
    let session = find_session(&state, id).await?;
    let generation = session.refresh();
    Ok(Json(ApiResponse::success(RefreshDto { generation })))
}

/// `DELETE /api/sessions/{id}`
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let session = state
        .sessions
        .write()
        .await
        .remove(&id)
        .ok_or_else(|| ApiError::session_not_found(id))?;

    session.unmount();
    info!(session_id = %id, "Session unmounted");
    Ok(Json(ApiResponse::success(())))
}

/// `GET /api/sessions/{id}/events`
///
/// Sends the current snapshot immediately, then one event per change.
/// Rapid changes are coalesced. The stream ends when the session is deleted
/// and its last task has finished.
pub async fn session_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let rx = find_session(&state, id).await?.subscribe();

    let stream = stream::unfold((rx, true), move |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }

        let json = {
            let snapshot = rx.borrow_and_update();
            serde_json::to_string(&SessionDto::new(id, snapshot.clone())).unwrap_or_default()
        };

        Some((Ok(Event::default().event("snapshot").data(json)), (rx, false)))
    });

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new().interval(Duration::from_secs(SSE_KEEP_ALIVE_SECS)),
    ))
}
