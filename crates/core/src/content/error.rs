//! Content error taxonomy.

use thiserror::Error;
use uuid::Uuid;

use crate::storage::StorageError;

/// Content operation errors surfaced to callers.
///
/// Orphan-blob cleanup failures are deliberately absent: they are logged as
/// warnings and never returned, since the caller-visible record state is
/// already correct when cleanup runs.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Requested record does not exist. No store mutation was attempted
    /// after this was detected.
    #[error("content not found: {0}")]
    NotFound(Uuid),

    /// The blob backend rejected or failed the upload. Guaranteed no record
    /// mutation occurred.
    #[error("attachment upload failed: {0}")]
    UploadFailed(#[source] StorageError),

    /// The record store rejected the mutation. When an upload preceded the
    /// failure, compensation already ran best-effort.
    #[error("record store operation failed: {0}")]
    PersistFailed(String),
}

impl ContentError {
    /// Create a persist error.
    #[must_use]
    pub fn persist(msg: impl Into<String>) -> Self {
        Self::PersistFailed(msg.into())
    }
}
