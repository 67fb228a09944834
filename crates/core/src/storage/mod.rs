//! Blob storage for content attachments using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (development only)
//!
//! The rest of the system talks to the [`BlobStore`] trait; the coordinator
//! is the only caller allowed to create or delete blobs owned by a record.

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{BlobRef, BlobStore, StorageService};
