use serde::Serialize;

use crate::models::MovieRecord;

/// Progress of the latest movie fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    Loading { generation: u64 },
    Ready,
    Failed(String),
}

impl FetchStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// What the results area shows. Exactly one branch at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Failed(String),
    Empty,
    Loaded(Vec<MovieRecord>),
}

impl ViewState {
    #[must_use]
    pub fn from_parts(status: &FetchStatus, movies: &[MovieRecord]) -> Self {
        match status {
            FetchStatus::Loading { .. } => Self::Loading,
            FetchStatus::Failed(message) => Self::Failed(message.clone()),
            FetchStatus::Idle | FetchStatus::Ready if movies.is_empty() => Self::Empty,
            FetchStatus::Idle | FetchStatus::Ready => Self::Loaded(movies.to_vec()),
        }
    }
}
