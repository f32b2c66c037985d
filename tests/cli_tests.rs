mod common;

use cinefind::config::Config;
use cinefind::constants::FETCH_ERROR_MESSAGE;
use cinefind::state::SharedState;
use common::spawn_mock_tmdb;

async fn shared_state() -> SharedState {
    let (base_url, _mock) = spawn_mock_tmdb().await;

    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.tmdb.base_url = base_url;
    config.tmdb.api_key = "test-key".to_string();
    config.trending.retry_delay_ms = 0;

    SharedState::new(config).await.unwrap()
}

#[tokio::test]
async fn test_search_failure_reports_only_generic_message() {
    let state = shared_state().await;

    for query in ["broken", "missing", "garbage"] {
        let err = cinefind::cli::cmd_search(&state, query).await.unwrap_err();
        assert_eq!(err.to_string(), FETCH_ERROR_MESSAGE);
    }

    assert!(state.trending.list(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_hit_is_recorded() {
    let state = shared_state().await;

    cinefind::cli::cmd_search(&state, "heat").await.unwrap();
    cinefind::cli::cmd_discover(&state).await.unwrap();

    let entries = state.trending.list(5).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].search_term, "heat");
    assert_eq!(entries[0].count, 1);
}
