//! Plain-text rendering of the discovery page.

use crate::models::{MovieRecord, TrendingEntry};
use crate::services::{RecordOutcome, SessionSnapshot, ViewState};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No movies found.";

#[must_use]
pub fn render_page(snapshot: &SessionSnapshot) -> String {
    let mut lines = vec![format!("Search: {}", snapshot.search_term)];

    if !snapshot.trending.is_empty() {
        lines.push(String::new());
        lines.push(render_trending(&snapshot.trending));
    }

    lines.push(String::new());
    lines.push("All Movies".to_string());
    lines.push(render_view(&snapshot.view()));

    lines.join("\n")
}

#[must_use]
pub fn render_view(view: &ViewState) -> String {
    match view {
        ViewState::Loading => LOADING_TEXT.to_string(),
        ViewState::Failed(message) => message.clone(),
        ViewState::Empty => EMPTY_TEXT.to_string(),
        ViewState::Loaded(movies) => render_cards(movies),
    }
}

/// Renders a fetched list the way the results area shows it.
#[must_use]
pub fn render_movie_list(movies: &[MovieRecord]) -> String {
    if movies.is_empty() {
        EMPTY_TEXT.to_string()
    } else {
        render_cards(movies)
    }
}

fn render_cards(movies: &[MovieRecord]) -> String {
    movies
        .iter()
        .map(render_movie_card)
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn render_movie_card(movie: &MovieRecord) -> String {
    let rating = movie
        .vote_average
        .map_or_else(|| "N/A".to_string(), |r| format!("{r:.1}"));
    let language = movie.original_language.as_deref().unwrap_or("N/A");
    let year = movie.release_year().unwrap_or("N/A");

    format!("• {} | ★ {} | {} | {}", movie.title, rating, language, year)
}

#[must_use]
pub fn render_trending(entries: &[TrendingEntry]) -> String {
    let mut lines = vec!["Trending Movies".to_string()];
    for (rank, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{:>2}. {} (searched {} times as \"{}\")",
            rank + 1,
            entry.title,
            entry.count,
            entry.search_term
        ));
    }
    lines.join("\n")
}

#[must_use]
pub fn render_record_outcome(outcome: &RecordOutcome) -> String {
    match outcome {
        RecordOutcome::Recorded { query, .. } => format!("✓ Recorded search \"{query}\""),
        RecordOutcome::Failed { query, error, .. } => {
            format!("Warning: could not record search \"{query}\": {error}")
        }
    }
}
