//! `SeaORM` implementation of the `TrendingStore` trait.

use async_trait::async_trait;

use crate::db::{SearchHit, Store};
use crate::models::trending::normalize_search_key;
use crate::models::{MovieRecord, TrendingEntry};
use crate::services::trending_service::{TrendingError, TrendingStore};

pub struct SeaOrmTrendingStore {
    store: Store,
    image_base_url: String,
}

impl SeaOrmTrendingStore {
    #[must_use]
    pub fn new(store: Store, image_base_url: impl Into<String>) -> Self {
        Self {
            store,
            image_base_url: image_base_url.into(),
        }
    }
}

#[async_trait]
impl TrendingStore for SeaOrmTrendingStore {
    async fn record_search(
        &self,
        query: &str,
        top_result: &MovieRecord,
    ) -> Result<(), TrendingError> {
        let search_key = normalize_search_key(query);
        if search_key.is_empty() {
            return Err(TrendingError::Validation(
                "Search term cannot be empty".to_string(),
            ));
        }

        let poster_url = top_result.poster_url(&self.image_base_url);

        self.store
            .record_search_hit(&SearchHit {
                search_key: &search_key,
                search_term: query.trim(),
                movie_id: top_result.id,
                title: &top_result.title,
                poster_url: poster_url.as_deref(),
            })
            .await?;

        Ok(())
    }

    async fn list_trending(&self, limit: u64) -> Result<Vec<TrendingEntry>, TrendingError> {
        Ok(self.store.top_trending(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn trending_store() -> SeaOrmTrendingStore {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmTrendingStore::new(store, "https://image.tmdb.org/t/p/w500")
    }

    #[tokio::test]
    async fn test_queries_aggregate_by_normalized_key() {
        let trending = trending_store().await;
        let mut batman = MovieRecord::new(268, "Batman");
        batman.poster_path = Some("/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg".to_string());

        trending.record_search("Batman", &batman).await.unwrap();
        trending.record_search("  batman ", &batman).await.unwrap();

        let entries = trending.list_trending(5).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count, 2);
        assert_eq!(entries[0].search_term, "batman");
        assert_eq!(
            entries[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg")
        );
    }

    #[tokio::test]
    async fn test_blank_query_is_rejected() {
        let trending = trending_store().await;
        let err = trending
            .record_search("   ", &MovieRecord::new(1, "Batman"))
            .await
            .unwrap_err();
        assert!(matches!(err, TrendingError::Validation(_)));
    }
}
