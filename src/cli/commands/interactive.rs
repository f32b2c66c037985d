use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::cli::render::{render_page, render_record_outcome};
use crate::state::SharedState;

const QUIT: &str = ":q";

/// Line-driven rendition of the search page. Each line read from stdin is
/// the whole new search term; the page is printed again whenever it changes.
pub async fn cmd_interactive(state: &SharedState) -> anyhow::Result<()> {
    let session = state.mount_session();
    let debounce = state.session_options().debounce;

    let mut rx = session.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last_page = String::new();
        loop {
            let page = render_page(&rx.borrow_and_update());
            if page != last_page {
                println!("{page}");
                println!("{:-<60}", "");
                last_page = page;
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    });

    println!("Type a search and press enter. An empty line shows popular movies, '{QUIT}' quits.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let term = line.trim_end_matches('\r');
        if term == QUIT {
            break;
        }
        session.set_search_term(term);
    }

    // Let the last edit go through before leaving.
    if session.debounce_pending() {
        tokio::time::sleep(debounce + Duration::from_millis(10)).await;
    }
    session.wait_until_settled().await;

    for outcome in session.flush_trending().await {
        info!(?outcome, "Trending record finished");
        println!("{}", render_record_outcome(&outcome));
    }

    session.unmount();
    renderer.abort();
    Ok(())
}
