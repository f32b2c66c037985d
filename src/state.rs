use std::sync::Arc;
use std::time::Duration;

use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::db::Store;
use crate::services::{
    MovieCatalog, SearchSession, SeaOrmTrendingStore, SessionOptions, TrendingOptions,
    TrendingService,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// Services shared by the CLI commands and the HTTP API.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tmdb: Arc<TmdbClient>,

    pub trending: Arc<TrendingService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.tmdb.request_timeout_seconds)?;
        let tmdb = Arc::new(TmdbClient::with_shared_client(http_client, &config.tmdb));

        let trending_store = Arc::new(SeaOrmTrendingStore::new(
            store.clone(),
            config.tmdb.image_base_url.clone(),
        ));
        let trending = Arc::new(TrendingService::new(
            trending_store,
            TrendingOptions::from(&config.trending),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            tmdb,
            trending,
        })
    }

    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            debounce: Duration::from_millis(self.config.search.debounce_ms),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<dyn MovieCatalog> {
        self.tmdb.clone()
    }

    /// Mounts a new search session backed by the shared services.
    #[must_use]
    pub fn mount_session(&self) -> SearchSession {
        SearchSession::mount(
            self.catalog(),
            Arc::clone(&self.trending),
            self.session_options(),
        )
    }
}
