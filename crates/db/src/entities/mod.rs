//! `SeaORM` entity definitions.

pub mod contents;
pub mod diaries;
