//! Repository implementations of the core store traits.
//!
//! Repositories hide the `SeaORM` details from the rest of the application;
//! the core crates only ever see the `RecordStore` and `DiaryStore` traits.

pub mod content;
pub mod diary;

pub use content::ContentRepository;
pub use diary::DiaryRepository;
