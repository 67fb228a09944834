//! Core business logic for Pinboard.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. The two backing stores are reached through traits
//! implemented elsewhere.
//!
//! # Modules
//!
//! - `content` - Content records and the attachment coordination core
//! - `diary` - Attachment-less diary entries (pure CRUD)
//! - `storage` - Blob store abstraction over object storage backends

pub mod content;
pub mod diary;
pub mod storage;
