//! A local stand-in for the TMDB v3 API.
//!
//! `/search/movie` answers by query: `broken` fails with 500, `missing` with
//! 404, `garbage` returns a body that is not JSON, anything else returns two
//! movies titled after the query. `/discover/movie` returns two popular
//! movies.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockTmdb {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockTmdb {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn note(&self, uri: &Uri, params: &HashMap<String, String>, headers: &HeaderMap) {
        self.seen.lock().unwrap().push(SeenRequest {
            path: uri.path().to_string(),
            params: params.clone(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
    }
}

async fn search(
    State(mock): State<MockTmdb>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.note(&uri, &params, &headers);
    let query = params.get("query").cloned().unwrap_or_default();

    match query.as_str() {
        "broken" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "status_message": "Internal error." })),
        )
            .into_response(),
        "missing" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "status_message": "The resource you requested could not be found." })),
        )
            .into_response(),
        "garbage" => "<html>definitely not json</html>".into_response(),
        "nothing" => Json(json!({ "page": 1, "results": [] })).into_response(),
        other => Json(json!({
            "page": 1,
            "results": [
                {
                    "id": 268,
                    "title": title_case(other),
                    "poster_path": "/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg",
                    "vote_average": 7.2,
                    "original_language": "en",
                    "release_date": "1989-06-21"
                },
                {
                    "id": 364,
                    "title": format!("{} Returns", title_case(other)),
                    "poster_path": null,
                    "vote_average": 6.9,
                    "original_language": "en",
                    "release_date": "1992-06-19"
                }
            ],
            "total_results": 2
        }))
        .into_response(),
    }
}

async fn discover(
    State(mock): State<MockTmdb>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.note(&uri, &params, &headers);
    Json(json!({
        "page": 1,
        "results": [
            { "id": 1, "title": "Popular One", "vote_average": 8.1, "release_date": "2024-03-01" },
            { "id": 2, "title": "Popular Two", "vote_average": 0.0, "release_date": "" }
        ]
    }))
    .into_response()
}

fn title_case(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Serves the mock on an ephemeral port and returns its `/3` base URL.
pub async fn spawn_mock_tmdb() -> (String, MockTmdb) {
    let mock = MockTmdb::default();
    let app = Router::new()
        .route("/3/search/movie", get(search))
        .route("/3/discover/movie", get(discover))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/3"), mock)
}
