mod interactive;
mod search;
mod trending;

pub use interactive::cmd_interactive;
pub use search::{cmd_discover, cmd_search};
pub use trending::cmd_trending;
