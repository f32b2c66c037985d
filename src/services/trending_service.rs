//! Trending-search aggregation.
//!
//! A [`TrendingStore`] keeps one counter per normalized query together with
//! that query's latest top result. [`TrendingService`] puts the configured
//! list size and record retry policy in front of it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TrendingConfig;
use crate::models::{MovieRecord, TrendingEntry};

#[derive(Debug, Error)]
pub enum TrendingError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for TrendingError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TrendingError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait]
pub trait TrendingStore: Send + Sync {
    /// Counts one search for `query` whose first result was `top_result`.
    async fn record_search(&self, query: &str, top_result: &MovieRecord)
    -> Result<(), TrendingError>;

    /// Most-searched entries, highest count first.
    async fn list_trending(&self, limit: u64) -> Result<Vec<TrendingEntry>, TrendingError>;
}

/// How a tracked search record ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    Recorded {
        query: String,
        movie_id: i64,
        attempts: u32,
    },
    Failed {
        query: String,
        movie_id: i64,
        attempts: u32,
        error: String,
    },
}

impl RecordOutcome {
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrendingOptions {
    pub limit: u64,
    pub record_attempts: u32,
    pub retry_delay: Duration,
}

impl From<&TrendingConfig> for TrendingOptions {
    fn from(config: &TrendingConfig) -> Self {
        Self {
            limit: config.limit,
            record_attempts: config.record_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl Default for TrendingOptions {
    fn default() -> Self {
        Self::from(&TrendingConfig::default())
    }
}

pub struct TrendingService {
    store: Arc<dyn TrendingStore>,
    options: TrendingOptions,
}

impl TrendingService {
    #[must_use]
    pub fn new(store: Arc<dyn TrendingStore>, options: TrendingOptions) -> Self {
        Self { store, options }
    }

    #[must_use]
    pub const fn options(&self) -> &TrendingOptions {
        &self.options
    }

    /// Trending entries at the configured size.
    pub async fn load(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
        self.store.list_trending(self.options.limit).await
    }

    pub async fn list(&self, limit: u64) -> Result<Vec<TrendingEntry>, TrendingError> {
        self.store.list_trending(limit).await
    }

    /// Records a search, retrying failed attempts. Validation errors are not
    /// retried.
    pub async fn record(&self, query: &str, top_result: &MovieRecord) -> RecordOutcome {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.store.record_search(query, top_result).await {
                Ok(()) => {
                    debug!(query, movie_id = top_result.id, attempts, "Search recorded");
                    metrics::counter!("cinefind_trending_records_total", "outcome" => "recorded")
                        .increment(1);
                    return RecordOutcome::Recorded {
                        query: query.to_string(),
                        movie_id: top_result.id,
                        attempts,
                    };
                }
                Err(e) => {
                    let retryable = !matches!(e, TrendingError::Validation(_));

                    if retryable && attempts < self.options.record_attempts {
                        warn!(query, attempts, error = %e, "Recording search failed, retrying");
                        tokio::time::sleep(self.options.retry_delay).await;
                        continue;
                    }

                    warn!(query, attempts, error = %e, "Recording search failed");
                    metrics::counter!("cinefind_trending_records_total", "outcome" => "failed")
                        .increment(1);
                    return RecordOutcome::Failed {
                        query: query.to_string(),
                        movie_id: top_result.id,
                        attempts,
                        error: e.to_string(),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` record calls.
    struct FlakyStore {
        failures: u32,
        calls: AtomicU32,
        recorded: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TrendingStore for FlakyStore {
        async fn record_search(
            &self,
            query: &str,
            _top_result: &MovieRecord,
        ) -> Result<(), TrendingError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if query.is_empty() {
                return Err(TrendingError::Validation("empty".to_string()));
            }
            if call < self.failures {
                return Err(TrendingError::Database("locked".to_string()));
            }
            self.recorded.lock().unwrap().push(query.to_string());
            Ok(())
        }

        async fn list_trending(&self, _limit: u64) -> Result<Vec<TrendingEntry>, TrendingError> {
            Ok(Vec::new())
        }
    }

    fn service(failures: u32, record_attempts: u32) -> (Arc<FlakyStore>, TrendingService) {
        let store = Arc::new(FlakyStore {
            failures,
            calls: AtomicU32::new(0),
            recorded: Mutex::new(Vec::new()),
        });
        let options = TrendingOptions {
            limit: 5,
            record_attempts,
            retry_delay: Duration::from_millis(10),
        };
        (store.clone(), TrendingService::new(store, options))
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_retries_transient_failure() {
        let (store, service) = service(1, 2);
        let outcome = service.record("dune", &MovieRecord::new(7, "Dune")).await;

        assert_eq!(
            outcome,
            RecordOutcome::Recorded {
                query: "dune".to_string(),
                movie_id: 7,
                attempts: 2,
            }
        );
        assert_eq!(*store.recorded.lock().unwrap(), vec!["dune".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_record_gives_up_after_attempts() {
        let (store, service) = service(5, 3);
        let outcome = service.record("dune", &MovieRecord::new(7, "Dune")).await;

        assert!(!outcome.is_recorded());
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_validation_error_is_not_retried() {
        let (store, service) = service(0, 3);
        let outcome = service.record("", &MovieRecord::new(7, "Dune")).await;

        assert!(matches!(outcome, RecordOutcome::Failed { attempts: 1, .. }));
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }
}
