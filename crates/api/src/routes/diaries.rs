//! Diary entry routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::OwnerId;
use crate::AppState;
use pinboard_core::diary::{DiaryEntry, DiaryStore, SaveDiaryInput};
use pinboard_db::DiaryRepository;
use pinboard_shared::AppError;

/// Creates the diary routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/diaries", get(get_diary))
        .route("/diaries", post(save_diary))
}

/// Query parameters for fetching a diary entry.
#[derive(Debug, Deserialize)]
struct DiaryQuery {
    /// Calendar day, `YYYY-MM-DD`.
    date: NaiveDate,
}

/// Request body for saving a diary entry.
#[derive(Debug, Deserialize)]
struct SaveDiaryRequest {
    /// Calendar day, `YYYY-MM-DD`.
    entry_date: NaiveDate,
    /// Entry text.
    body: String,
}

/// Response for a diary entry.
#[derive(Debug, Serialize)]
pub struct DiaryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Calendar day.
    pub entry_date: NaiveDate,
    /// Entry text.
    pub body: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
    /// Updated at timestamp (ISO 8601).
    pub updated_at: String,
}

impl From<DiaryEntry> for DiaryResponse {
    fn from(entry: DiaryEntry) -> Self {
        Self {
            id: entry.id,
            entry_date: entry.entry_date,
            body: entry.body,
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}

/// GET `/diaries?date=YYYY-MM-DD` - fetch the owner's entry for one day.
async fn get_diary(
    State(state): State<AppState>,
    owner: OwnerId,
    Query(query): Query<DiaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = DiaryRepository::new((*state.db).clone());

    let entry = repo
        .get_by_date(&owner.0, query.date)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("diary for {}", query.date))))?;

    Ok(Json(DiaryResponse::from(entry)))
}

/// POST `/diaries` - insert or replace the owner's entry for one day.
async fn save_diary(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(payload): Json<SaveDiaryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = DiaryRepository::new((*state.db).clone());

    let input = SaveDiaryInput {
        owner_id: owner.0,
        entry_date: payload.entry_date,
        body: payload.body,
    };

    let entry = repo.save(input).await?;
    info!(entry_id = %entry.id, entry_date = %entry.entry_date, "diary saved");

    Ok((StatusCode::CREATED, Json(DiaryResponse::from(entry))))
}
