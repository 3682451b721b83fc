//! Error types for the Q&A storage layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QnaError>;

/// Failures surfaced by a storage backend.
///
/// Backends never interpret these; callers decide how each maps to a
/// user-facing outcome.
#[derive(Error, Debug)]
pub enum QnaError {
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl QnaError {
    pub fn is_duplicate_username(&self) -> bool {
        matches!(self, QnaError::DuplicateUsername(_))
    }
}
