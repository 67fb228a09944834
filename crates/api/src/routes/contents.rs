//! Content record routes.
//!
//! Create and update take multipart bodies: a `content` part carrying the
//! JSON fields and an optional `image` file part. All attachment handling
//! happens in the core service; these handlers only marshal.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extractors::OwnerId;
use crate::AppState;
use pinboard_core::content::{
    AttachmentUpload, ContentRecord, ContentService, CreateContentInput, UpdateContentInput,
};
use pinboard_core::storage::StorageService;
use pinboard_db::ContentRepository;
use pinboard_shared::AppError;

/// Creates the content routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contents", get(list_contents))
        .route("/contents", post(create_content))
        .route("/contents/{id}", get(get_content))
        .route("/contents/{id}", put(update_content))
        .route("/contents/{id}", delete(delete_content))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// JSON fields of the `content` multipart part.
#[derive(Debug, Deserialize)]
struct ContentFields {
    /// Post title.
    title: String,
    /// Post body.
    body: String,
}

/// Response for a content record.
#[derive(Debug, Serialize)]
pub struct ContentResponse {
    /// Record ID.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Resolvable attachment URL, if the record owns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
    /// Opaque owner identifier.
    pub owner_id: String,
    /// Created at timestamp (ISO 8601).
    pub created_at: String,
    /// Updated at timestamp (ISO 8601).
    pub updated_at: String,
}

impl From<ContentRecord> for ContentResponse {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            body: record.body,
            attachment_url: record.attachment.map(|a| a.link),
            owner_id: record.owner_id,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn service(state: &AppState) -> ContentService<StorageService, ContentRepository> {
    ContentService::new(Arc::clone(&state.storage), Arc::clone(&state.contents))
}

/// Split a multipart body into the JSON fields and the optional image part.
async fn parse_multipart(
    mut multipart: Multipart,
) -> Result<(ContentFields, Option<AttachmentUpload>), ApiError> {
    let mut fields: Option<ContentFields> = None;
    let mut upload: Option<AttachmentUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::Validation(format!("malformed multipart body: {e}"))))?
    {
        // Capture the name up front; reading the body consumes the field.
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("content") => {
                let raw = field.bytes().await.map_err(|e| {
                    ApiError(AppError::Validation(format!("unreadable content part: {e}")))
                })?;
                let parsed = serde_json::from_slice(&raw).map_err(|e| {
                    ApiError(AppError::Validation(format!("invalid content JSON: {e}")))
                })?;
                fields = Some(parsed);
            }
            Some("image") => {
                let filename = field
                    .file_name()
                    .unwrap_or("attachment")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError(AppError::Validation(format!("unreadable image part: {e}")))
                })?;
                upload = Some(AttachmentUpload {
                    bytes,
                    filename,
                    content_type,
                });
            }
            _ => {}
        }
    }

    let fields = fields.ok_or_else(|| {
        ApiError(AppError::Validation("missing 'content' part".to_string()))
    })?;

    Ok((fields, upload))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/contents` - list all records, most recent first.
async fn list_contents(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let records = service(&state).list().await?;
    let response: Vec<ContentResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// GET `/contents/{id}` - fetch one record.
async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = service(&state).get(id).await?;
    Ok(Json(ContentResponse::from(record)))
}

/// POST `/contents` - create a record, optionally with an image.
async fn create_content(
    State(state): State<AppState>,
    owner: OwnerId,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (fields, upload) = parse_multipart(multipart).await?;

    let input = CreateContentInput {
        title: fields.title,
        body: fields.body,
        owner_id: owner.0,
    };

    let record = service(&state).create(input, upload).await?;
    info!(record_id = %record.id, "content created");

    Ok((StatusCode::CREATED, Json(ContentResponse::from(record))))
}

/// PUT `/contents/{id}` - update a record, optionally replacing its image.
async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (fields, upload) = parse_multipart(multipart).await?;

    let input = UpdateContentInput {
        title: fields.title,
        body: fields.body,
    };

    let record = service(&state).update(id, input, upload).await?;
    info!(record_id = %record.id, "content updated");

    Ok(Json(ContentResponse::from(record)))
}

/// DELETE `/contents/{id}` - delete a record and release its attachment.
async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    service(&state).delete(id).await?;
    info!(record_id = %id, "content deleted");

    Ok(StatusCode::NO_CONTENT)
}
