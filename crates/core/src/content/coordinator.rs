//! Create/update/delete orchestration across the two stores.
//!
//! Neither store supports a transaction spanning both, so each operation is
//! a strictly sequential pipeline with a single compensation branch:
//!
//! ```text
//! Idle -> (Uploading?) -> Mutating -> Committed -> (Cleanup) -> Done
//!                             \
//!                              -> CompensatingDelete -> Failed
//! ```
//!
//! The compensation branch is reachable only from a record-store failure
//! that followed a successful upload. There is no internal retry loop;
//! retries are a caller concern, safe because every upload produces a fresh
//! blob key.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::error::ContentError;
use super::store::RecordStore;
use super::types::{AttachmentUpload, ContentRecord, CreateContentInput, UpdateContentInput};
use crate::storage::{BlobRef, BlobStore};

/// Orchestrates blob-store and record-store calls so that a record never
/// references a blob that does not exist.
///
/// Stateless between invocations; the only shared state is the two stores.
pub struct AttachmentCoordinator<B, R> {
    blobs: Arc<B>,
    records: Arc<R>,
}

impl<B: BlobStore, R: RecordStore> AttachmentCoordinator<B, R> {
    /// Create a new coordinator over the two stores.
    #[must_use]
    pub fn new(blobs: Arc<B>, records: Arc<R>) -> Self {
        Self { blobs, records }
    }

    /// Create a record, optionally owning a freshly uploaded blob.
    ///
    /// The blob is stored before the record is created to reference it. If
    /// the record insert then fails, the blob is deleted best-effort so the
    /// caller-visible outcome (no record) leaves nothing referenced behind.
    ///
    /// # Errors
    ///
    /// `UploadFailed` if the blob backend fails (no record side effect);
    /// `PersistFailed` if the record insert fails (after compensation).
    pub async fn create(
        &self,
        input: CreateContentInput,
        upload: Option<AttachmentUpload>,
    ) -> Result<ContentRecord, ContentError> {
        let Some(upload) = upload else {
            return self.records.create(input, None).await;
        };

        let blob = self.upload(upload).await?;

        match self.records.create(input, Some(blob.clone())).await {
            Ok(record) => {
                info!(record_id = %record.id, key = %blob.key, "content created with attachment");
                Ok(record)
            }
            Err(err) => {
                warn!(key = %blob.key, error = %err, "record insert failed, compensating upload");
                self.release_blob(&blob.key).await;
                Err(err)
            }
        }
    }

    /// Update a record's text fields and optionally replace its attachment.
    ///
    /// With a new upload, the new blob is durable before the record switches
    /// to it, and the old blob is removed only after the switch succeeded.
    /// A failed persist compensates by deleting the new blob and leaves the
    /// old record and old blob untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` if the record does not exist (checked before any other
    /// store call); `UploadFailed` or `PersistFailed` as in [`Self::create`].
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContentInput,
        upload: Option<AttachmentUpload>,
    ) -> Result<ContentRecord, ContentError> {
        let _guard = self.records.lock(id).await;

        let old = self
            .records
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))?;

        let Some(upload) = upload else {
            // Text-only update; the attachment reference is carried over.
            return self
                .records
                .update(id, input, old.attachment)
                .await?
                .ok_or(ContentError::NotFound(id));
        };

        let new_blob = self.upload(upload).await?;

        match self.records.update(id, input, Some(new_blob.clone())).await {
            Ok(Some(record)) => {
                // The record is now authoritative on the new blob; the old
                // one is unreferenced and safe to drop.
                if let Some(BlobRef { key, .. }) = old.attachment {
                    self.release_blob(&key).await;
                }
                info!(record_id = %record.id, key = %new_blob.key, "attachment replaced");
                Ok(record)
            }
            Ok(None) => {
                // The id vanished between get and update. The per-id lock
                // makes this unreachable through this coordinator, but the
                // new blob must still not be left referenced by nothing.
                warn!(key = %new_blob.key, "record disappeared mid-update, compensating upload");
                self.release_blob(&new_blob.key).await;
                Err(ContentError::NotFound(id))
            }
            Err(err) => {
                warn!(key = %new_blob.key, error = %err, "record update failed, compensating upload");
                self.release_blob(&new_blob.key).await;
                Err(err)
            }
        }
    }

    /// Delete a record and release its owned blob.
    ///
    /// The record row goes first; only once it is gone is the blob deleted,
    /// so a failed row delete leaves the blob correctly referenced by the
    /// still-existing record.
    ///
    /// # Errors
    ///
    /// `NotFound` if the record does not exist; `PersistFailed` if the row
    /// delete fails (blob untouched).
    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        let _guard = self.records.lock(id).await;

        let old = self
            .records
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))?;

        if !self.records.delete(id).await? {
            return Err(ContentError::NotFound(id));
        }

        if let Some(BlobRef { key, .. }) = old.attachment {
            self.release_blob(&key).await;
        }

        info!(record_id = %id, "content deleted");
        Ok(())
    }

    async fn upload(&self, upload: AttachmentUpload) -> Result<BlobRef, ContentError> {
        let blob = self
            .blobs
            .upload(upload.bytes, &upload.filename, &upload.content_type)
            .await
            .map_err(ContentError::UploadFailed)?;
        info!(key = %blob.key, "attachment uploaded");
        Ok(blob)
    }

    /// Best-effort blob deletion, attempted exactly once.
    ///
    /// A failure leaves an orphaned blob behind: logged, never surfaced,
    /// because at every call site the record state is already the
    /// caller-visible truth and no record references this key.
    async fn release_blob(&self, key: &str) {
        if let Err(err) = self.blobs.delete(key).await {
            warn!(key = %key, error = %err, "orphan blob: cleanup delete failed");
        }
    }
}
