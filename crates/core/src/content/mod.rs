//! Content records and the attachment coordination core.
//!
//! A content record is a short text post that may own exactly one blob in
//! the object store. The record store and the blob store fail independently
//! and share no transaction, so every mutation runs through the
//! [`AttachmentCoordinator`]: an ordered pipeline which writes the new blob
//! before the record references it, removes the old blob only after the
//! reference switch is durable, and compensates a failed persist by deleting
//! the just-uploaded blob. The only tolerated inconsistency is an orphaned
//! unreferenced blob; a record never points at a blob that does not exist.

mod coordinator;
mod error;
mod service;
mod store;
mod types;


pub use coordinator::AttachmentCoordinator;
pub use error::ContentError;
pub use service::ContentService;
pub use store::RecordStore;
pub use types::{AttachmentUpload, ContentRecord, CreateContentInput, UpdateContentInput};
