//! Initial database migration.
//!
//! Creates the contents and diaries tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(CONTENTS_SQL).await?;
        db.execute_unprepared(DIARIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const CONTENTS_SQL: &str = r"
CREATE TABLE contents (
    id UUID PRIMARY KEY,
    title VARCHAR(255) NOT NULL,
    body TEXT NOT NULL,
    attachment_key TEXT,
    attachment_link TEXT,
    owner_id VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- An attachment reference is fully present or fully absent.
    CONSTRAINT contents_attachment_all_or_none
        CHECK ((attachment_key IS NULL) = (attachment_link IS NULL)),

    -- A blob is owned by at most one record.
    CONSTRAINT contents_attachment_key_unique UNIQUE (attachment_key)
);

CREATE INDEX idx_contents_created_at ON contents (created_at DESC);
CREATE INDEX idx_contents_owner ON contents (owner_id);
";

const DIARIES_SQL: &str = r"
CREATE TABLE diaries (
    id UUID PRIMARY KEY,
    entry_date DATE NOT NULL,
    body TEXT NOT NULL,
    owner_id VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    -- One entry per owner and day.
    CONSTRAINT diaries_owner_date_unique UNIQUE (owner_id, entry_date)
);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS diaries;
DROP TABLE IF EXISTS contents;
";
