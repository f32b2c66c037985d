/// The one message users see for any movie fetch failure.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

pub const USER_AGENT: &str = "Cinefind/0.1";

pub mod tmdb {

    pub const SEARCH_PATH: &str = "/search/movie";

    pub const DISCOVER_PATH: &str = "/discover/movie";

    pub const DISCOVER_SORT: &str = "popularity.desc";
}

pub mod limits {

    pub const MAX_TRENDING_LIMIT: u64 = 50;

    pub const SSE_KEEP_ALIVE_SECS: u64 = 15;
}
