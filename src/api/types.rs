use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::MovieRecord;
use crate::services::{RecordOutcome, SessionSnapshot, ViewState};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieListDto {
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub results: Vec<MovieRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending_record: Option<RecordOutcome>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreatedDto {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionDto {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub view: ViewState,
}

impl SessionDto {
    #[must_use]
    pub fn new(id: Uuid, snapshot: SessionSnapshot) -> Self {
        let view = snapshot.view();
        Self { id, snapshot, view }
    }
}

#[derive(Debug, Deserialize)]
pub struct TermRequest {
    pub term: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshDto {
    pub generation: u64,
}
