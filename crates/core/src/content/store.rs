//! Record store contract.

use uuid::Uuid;

use super::error::ContentError;
use super::types::{ContentRecord, CreateContentInput, UpdateContentInput};
use crate::storage::BlobRef;

/// Relational store of content records.
///
/// Implemented by the db crate. Each call is atomic with respect to the
/// single record it touches; no multi-record transaction is exposed.
pub trait RecordStore: Send + Sync {
    /// Guard witnessing exclusive access to one record id.
    type Lock: Send;

    /// Acquire exclusive-per-id serialization for the duration of one
    /// coordinator operation.
    ///
    /// Two concurrent get-then-mutate sequences against the same id must
    /// not interleave: otherwise both could read the same prior attachment
    /// key and each decide to delete it. This is a hard requirement on the
    /// implementation, not optional tuning. Operations on different ids are
    /// fully independent.
    fn lock(&self, id: Uuid) -> impl std::future::Future<Output = Self::Lock> + Send;

    /// Create a new record; the store assigns the id.
    fn create(
        &self,
        input: CreateContentInput,
        attachment: Option<BlobRef>,
    ) -> impl std::future::Future<Output = Result<ContentRecord, ContentError>> + Send;

    /// Fetch a record by id.
    fn get(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// Update text fields and the attachment reference in one atomic write.
    /// Returns `None` if the record does not exist.
    fn update(
        &self,
        id: Uuid,
        input: UpdateContentInput,
        attachment: Option<BlobRef>,
    ) -> impl std::future::Future<Output = Result<Option<ContentRecord>, ContentError>> + Send;

    /// Delete a record. Returns `false` if it did not exist.
    fn delete(
        &self,
        id: Uuid,
    ) -> impl std::future::Future<Output = Result<bool, ContentError>> + Send;

    /// List all records, most recent first.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ContentRecord>, ContentError>> + Send;
}
