use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::constants::limits::MAX_TRENDING_LIMIT;
use crate::models::TrendingEntry;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub struct TrendingRequest {
    pub limit: Option<u64>,
}

/// `GET /api/trending?limit=`
pub async fn list_trending(
    State(state): State<Arc<AppState>>,
    Query(request): Query<TrendingRequest>,
) -> Result<Json<ApiResponse<Vec<TrendingEntry>>>, ApiError> {
    let limit = request
        .limit
        .unwrap_or(state.shared.trending.options().limit)
        .clamp(1, MAX_TRENDING_LIMIT);

    let entries = state.shared.trending.list(limit).await?;
    Ok(Json(ApiResponse::success(entries)))
}
