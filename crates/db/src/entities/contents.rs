//! `SeaORM` Entity for the contents table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per content record. The attachment columns are jointly null or
/// jointly non-null, enforced by a CHECK constraint, and `attachment_key`
/// is UNIQUE so no two records own the same blob.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub attachment_key: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub attachment_link: Option<String>,
    pub owner_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
