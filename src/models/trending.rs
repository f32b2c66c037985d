use serde::{Deserialize, Serialize};

/// Aggregated popularity of one search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub id: i32,
    pub search_term: String,
    pub count: i64,
    pub movie_id: i64,
    pub title: String,
    pub poster_url: Option<String>,
    pub updated_at: String,
}

/// Key under which searches are aggregated.
#[must_use]
pub fn normalize_search_key(query: &str) -> String {
    query.trim().to_lowercase()
}
