use thiserror::Error;

use crate::scheduling::ConflictReason;

#[derive(Error, Debug)]
pub enum ClubError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Booking conflict: {} rule(s) violated", .0.len())]
    Conflict(Vec<ConflictReason>),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ClubResult<T> = Result<T, ClubError>;
