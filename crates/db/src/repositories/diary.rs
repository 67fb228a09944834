//! Diary repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::entities::diaries;
use pinboard_core::diary::{DiaryEntry, DiaryError, DiaryStore, SaveDiaryInput};

/// Diary repository implementation.
#[derive(Clone)]
pub struct DiaryRepository {
    db: DatabaseConnection,
}

impl DiaryRepository {
    /// Create a new diary repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> Result<Option<diaries::Model>, DiaryError> {
        diaries::Entity::find()
            .filter(diaries::Column::OwnerId.eq(owner_id))
            .filter(diaries::Column::EntryDate.eq(date))
            .one(&self.db)
            .await
            .map_err(|e| DiaryError::repository(e.to_string()))
    }
}

impl DiaryStore for DiaryRepository {
    async fn save(&self, input: SaveDiaryInput) -> Result<DiaryEntry, DiaryError> {
        let now = Utc::now();

        // Upsert per (owner, day): replace the body if an entry exists.
        let model = match self.find(&input.owner_id, input.entry_date).await? {
            Some(existing) => {
                let mut active_model: diaries::ActiveModel = existing.into();
                active_model.body = Set(input.body);
                active_model.updated_at = Set(now.into());
                active_model
                    .update(&self.db)
                    .await
                    .map_err(|e| DiaryError::repository(e.to_string()))?
            }
            None => {
                let active_model = diaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    entry_date: Set(input.entry_date),
                    body: Set(input.body),
                    owner_id: Set(input.owner_id),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                };
                active_model
                    .insert(&self.db)
                    .await
                    .map_err(|e| DiaryError::repository(e.to_string()))?
            }
        };

        Ok(to_domain(model))
    }

    async fn get_by_date(
        &self,
        owner_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DiaryEntry>, DiaryError> {
        Ok(self.find(owner_id, date).await?.map(to_domain))
    }
}

/// Convert database model to domain model.
fn to_domain(model: diaries::Model) -> DiaryEntry {
    DiaryEntry {
        id: model.id,
        entry_date: model.entry_date,
        body: model.body,
        owner_id: model.owner_id,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        updated_at: model.updated_at.with_timezone(&chrono::Utc),
    }
}
