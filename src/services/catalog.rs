//! Source of movie listings consumed by search sessions.

use async_trait::async_trait;

use crate::clients::tmdb::{MovieQuery, TmdbClient, TmdbError};
use crate::models::MovieRecord;

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Issues exactly one upstream request for `query`.
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, TmdbError>;
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<MovieRecord>, TmdbError> {
        Self::fetch_movies(self, query).await
    }
}
