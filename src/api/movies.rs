use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::clients::tmdb::MovieQuery;

use super::{ApiError, ApiResponse, AppState, MovieListDto};

#[derive(Debug, Deserialize)]
pub struct MoviesRequest {
    pub query: Option<String>,
}

/// One fetch without a session. A search hit is recorded in trending before
/// the response is sent.
///
/// # Endpoint
/// `GET /api/movies?query=`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(request): Query<MoviesRequest>,
) -> Result<Json<ApiResponse<MovieListDto>>, ApiError> {
    let query = MovieQuery::from_input(request.query.as_deref());

    let results = state
        .shared
        .tmdb
        .fetch_movies(&query)
        .await
        .map_err(|e| ApiError::FetchFailed(e.to_string()))?;

    info!(mode = query.mode(), count = results.len(), "Movies listed");

    let trending_record = match (query.search_term(), results.first()) {
        (Some(term), Some(top)) => Some(state.shared.trending.record(term, top).await),
        _ => None,
    };

    Ok(Json(ApiResponse::success(MovieListDto {
        mode: query.mode(),
        query: query.search_term().map(str::to_string),
        results,
        trending_record,
    })))
}
