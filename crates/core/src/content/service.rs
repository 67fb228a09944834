//! Content service facade.

use std::sync::Arc;

use uuid::Uuid;

use super::coordinator::AttachmentCoordinator;
use super::error::ContentError;
use super::store::RecordStore;
use super::types::{AttachmentUpload, ContentRecord, CreateContentInput, UpdateContentInput};
use crate::storage::BlobStore;

/// Thin facade over the coordinator and the record store.
///
/// Adds no consistency logic of its own: mutations with attachment handling
/// go through the coordinator, reads go straight to the record store.
pub struct ContentService<B, R> {
    coordinator: AttachmentCoordinator<B, R>,
    records: Arc<R>,
}

impl<B: BlobStore, R: RecordStore> ContentService<B, R> {
    /// Create a new content service.
    #[must_use]
    pub fn new(blobs: Arc<B>, records: Arc<R>) -> Self {
        Self {
            coordinator: AttachmentCoordinator::new(blobs, Arc::clone(&records)),
            records,
        }
    }

    /// Create a record, optionally with an attachment.
    ///
    /// # Errors
    ///
    /// See [`AttachmentCoordinator::create`].
    pub async fn create(
        &self,
        input: CreateContentInput,
        upload: Option<AttachmentUpload>,
    ) -> Result<ContentRecord, ContentError> {
        self.coordinator.create(input, upload).await
    }

    /// Update a record, optionally replacing its attachment.
    ///
    /// # Errors
    ///
    /// See [`AttachmentCoordinator::update`].
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateContentInput,
        upload: Option<AttachmentUpload>,
    ) -> Result<ContentRecord, ContentError> {
        self.coordinator.update(id, input, upload).await
    }

    /// Delete a record and release its owned blob.
    ///
    /// # Errors
    ///
    /// See [`AttachmentCoordinator::delete`].
    pub async fn delete(&self, id: Uuid) -> Result<(), ContentError> {
        self.coordinator.delete(id).await
    }

    /// Fetch a record by id.
    ///
    /// # Errors
    ///
    /// `NotFound` if the record does not exist.
    pub async fn get(&self, id: Uuid) -> Result<ContentRecord, ContentError> {
        self.records
            .get(id)
            .await?
            .ok_or(ContentError::NotFound(id))
    }

    /// List all records, most recent first.
    ///
    /// # Errors
    ///
    /// `PersistFailed` if the record store fails.
    pub async fn list(&self) -> Result<Vec<ContentRecord>, ContentError> {
        self.records.list().await
    }
}
