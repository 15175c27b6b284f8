//! Repository Module
//!
//! CRUD operations over the SQLite tables, as free functions taking
//! `&SqlitePool`. SQL is written with runtime-checked queries so the crate
//! builds without a live database.

pub mod announcement;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod setting;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
