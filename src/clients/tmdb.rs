use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::{AuthMethod, TmdbConfig};
use crate::constants::tmdb::{DISCOVER_PATH, DISCOVER_SORT, SEARCH_PATH};
use crate::models::MovieRecord;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDB request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("TMDB API error: {status} - {body}")]
    Status { status: StatusCode, body: String },

    #[error("TMDB response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Which listing a fetch asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    Discover,
    Search(String),
}

impl MovieQuery {
    /// An absent or empty query discovers; anything else searches verbatim.
    #[must_use]
    pub fn from_input(query: Option<&str>) -> Self {
        match query {
            Some(q) if !q.is_empty() => Self::Search(q.to_string()),
            _ => Self::Discover,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Discover => "discover",
            Self::Search(_) => "search",
        }
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Discover => None,
            Self::Search(q) => Some(q),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieListResponse {
    results: Vec<MovieRecord>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    auth_method: AuthMethod,
}

impl TmdbClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &TmdbConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            auth_method: config.auth_method,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Full request URL for a query, including the key when it travels in
    /// the query string.
    #[must_use]
    pub fn endpoint(&self, query: &MovieQuery) -> String {
        let mut params: Vec<String> = Vec::with_capacity(2);

        if self.auth_method == AuthMethod::ApiKey {
            params.push(format!("api_key={}", urlencoding::encode(&self.api_key)));
        }

        let path = match query {
            MovieQuery::Search(q) => {
                params.push(format!("query={}", urlencoding::encode(q)));
                SEARCH_PATH
            }
            MovieQuery::Discover => {
                params.push(format!("sort_by={DISCOVER_SORT}"));
                DISCOVER_PATH
            }
        };

        format!("{}{}?{}", self.base_url, path, params.join("&"))
    }

    pub async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, TmdbError> {
        let url = self.endpoint(query);
        debug!(mode = query.mode(), "Fetching movies from TMDB");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json");

        if self.auth_method == AuthMethod::Bearer {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Status { status, body });
        }

        let body = response.text().await?;
        let parsed: MovieListResponse = serde_json::from_str(&body)?;

        Ok(parsed.results)
    }
}
