//! Content record types and inputs.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::BlobRef;

/// A persisted post, optionally owning one attachment blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Unique identifier, assigned by the record store on create.
    pub id: Uuid,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Owned attachment, fully present or fully absent.
    pub attachment: Option<BlobRef>,
    /// Opaque owner identifier supplied by the caller layer.
    pub owner_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a content record.
#[derive(Debug, Clone)]
pub struct CreateContentInput {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Opaque owner identifier. Not validated or resolved by the core.
    pub owner_id: String,
}

/// Input for updating a content record's text fields.
#[derive(Debug, Clone)]
pub struct UpdateContentInput {
    /// New title.
    pub title: String,
    /// New body.
    pub body: String,
}

/// Raw attachment bytes handed in by the caller layer.
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// File contents.
    pub bytes: Bytes,
    /// Caller-visible filename, sanitized by the blob store.
    pub filename: String,
    /// MIME type of the file.
    pub content_type: String,
}
