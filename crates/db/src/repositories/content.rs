//! Content record repository.
//!
//! Implements the core `RecordStore` contract using `SeaORM`, including the
//! exclusive-per-id serialization the attachment coordinator requires.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::entities::contents;
use pinboard_core::content::{
    ContentError, ContentRecord, CreateContentInput, RecordStore, UpdateContentInput,
};
use pinboard_core::storage::BlobRef;

/// Content repository implementation.
#[derive(Clone)]
pub struct ContentRepository {
    db: DatabaseConnection,
    // Single-writer discipline per record id. Entries are never pruned;
    // the map is bounded by the distinct ids touched by this process.
    locks: Arc<DashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ContentRepository {
    /// Create a new content repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            locks: Arc::new(DashMap::new()),
        }
    }
}

impl RecordStore for ContentRepository {
    type Lock = OwnedMutexGuard<()>;

    async fn lock(&self, id: Uuid) -> Self::Lock {
        // Clone the slot out before awaiting so no map shard stays locked.
        let slot = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        slot.lock_owned().await
    }

    async fn create(
        &self,
        input: CreateContentInput,
        attachment: Option<BlobRef>,
    ) -> Result<ContentRecord, ContentError> {
        let now = Utc::now();
        let active_model = contents::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            body: Set(input.body),
            attachment_key: Set(attachment.as_ref().map(|a| a.key.clone())),
            attachment_link: Set(attachment.map(|a| a.link)),
            owner_id: Set(input.owner_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn get(&self, id: Uuid) -> Result<Option<ContentRecord>, ContentError> {
        let model = contents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateContentInput,
        attachment: Option<BlobRef>,
    ) -> Result<Option<ContentRecord>, ContentError> {
        let Some(model) = contents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active_model: contents::ActiveModel = model.into();
        active_model.title = Set(input.title);
        active_model.body = Set(input.body);
        active_model.attachment_key = Set(attachment.as_ref().map(|a| a.key.clone()));
        active_model.attachment_link = Set(attachment.map(|a| a.link));
        active_model.updated_at = Set(Utc::now().into());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?;

        Ok(Some(to_domain(model)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ContentError> {
        let result = contents::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self) -> Result<Vec<ContentRecord>, ContentError> {
        let models = contents::Entity::find()
            .order_by_desc(contents::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ContentError::persist(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

/// Convert database model to domain model.
///
/// The CHECK constraint guarantees the attachment columns are jointly null
/// or jointly non-null, so `zip` loses nothing.
fn to_domain(model: contents::Model) -> ContentRecord {
    ContentRecord {
        id: model.id,
        title: model.title,
        body: model.body,
        attachment: model
            .attachment_key
            .zip(model.attachment_link)
            .map(|(key, link)| BlobRef { key, link }),
        owner_id: model.owner_id,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    }
}
