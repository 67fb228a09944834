//! `SeaORM` Entity for the diaries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per owner and calendar day, UNIQUE on `(owner_id, entry_date)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "diaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub entry_date: Date,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub owner_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
