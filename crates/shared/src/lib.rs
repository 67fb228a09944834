//! Shared configuration and error types for Pinboard.
//!
//! This crate provides the pieces used across all other crates:
//! - Application configuration loaded from files and environment
//! - Application-wide error taxonomy for the HTTP boundary

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
