use tracing::error;

use crate::cli::render::{render_movie_list, render_record_outcome};
use crate::clients::tmdb::MovieQuery;
use crate::constants::FETCH_ERROR_MESSAGE;
use crate::state::SharedState;

pub async fn cmd_search(state: &SharedState, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");
    run_fetch(state, MovieQuery::from_input(Some(query))).await
}

pub async fn cmd_discover(state: &SharedState) -> anyhow::Result<()> {
    println!("Popular movies");
    run_fetch(state, MovieQuery::Discover).await
}

/// Upstream failures reach the user only as the generic fetch message.
async fn run_fetch(state: &SharedState, query: MovieQuery) -> anyhow::Result<()> {
    let mode = query.mode();
    let movies = match state.tmdb.fetch_movies(&query).await {
        Ok(movies) => movies,
        Err(e) => {
            error!(mode, error = %e, "Fetch error");
            anyhow::bail!(FETCH_ERROR_MESSAGE);
        }
    };

    println!("{:-<60}", "");
    println!("{}", render_movie_list(&movies));

    if let (Some(term), Some(top)) = (query.search_term(), movies.first()) {
        let outcome = state.trending.record(term, top).await;
        println!();
        println!("{}", render_record_outcome(&outcome));
    }

    Ok(())
}
