use crate::cli::render::render_trending;
use crate::constants::limits::MAX_TRENDING_LIMIT;
use crate::state::SharedState;

pub async fn cmd_trending(state: &SharedState, limit: Option<u64>) -> anyhow::Result<()> {
    let limit = limit
        .unwrap_or(state.trending.options().limit)
        .clamp(1, MAX_TRENDING_LIMIT);

    let entries = state.trending.list(limit).await?;

    if entries.is_empty() {
        println!("No searches recorded yet.");
        println!();
        println!("Search with: cinefind search \"movie title\"");
        return Ok(());
    }

    println!("{}", render_trending(&entries));
    Ok(())
}
