//! Diary entries: attachment-less, pure CRUD.
//!
//! One entry per owner and calendar day; saving again for the same day
//! replaces the body. The blob store is never involved, so these go
//! straight to the store with no coordination.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A persisted diary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Unique identifier.
    pub id: Uuid,
    /// Calendar day this entry belongs to.
    pub entry_date: NaiveDate,
    /// Entry text.
    pub body: String,
    /// Opaque owner identifier.
    pub owner_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for saving a diary entry.
#[derive(Debug, Clone)]
pub struct SaveDiaryInput {
    /// Opaque owner identifier.
    pub owner_id: String,
    /// Calendar day.
    pub entry_date: NaiveDate,
    /// Entry text.
    pub body: String,
}

/// Diary store errors.
#[derive(Debug, Error)]
pub enum DiaryError {
    /// Underlying store failed.
    #[error("diary store operation failed: {0}")]
    Repository(String),
}

impl DiaryError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

/// Store of diary entries, implemented by the db crate.
pub trait DiaryStore: Send + Sync {
    /// Insert or replace the entry for `(owner_id, entry_date)`.
    fn save(
        &self,
        input: SaveDiaryInput,
    ) -> impl std::future::Future<Output = Result<DiaryEntry, DiaryError>> + Send;

    /// Fetch the entry for one owner and day, if any.
    fn get_by_date(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> impl std::future::Future<Output = Result<Option<DiaryEntry>, DiaryError>> + Send;
}
