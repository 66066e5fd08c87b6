//! # AppError
//!
//! Centralized error handling for Flingo.
//! Lookup failures and the two halves of an upload (bytes, then metadata)
//! each get their own variant so the transport layer can tell them apart.

use thiserror::Error;

/// The primary error type for all fl-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// No record matches the code (unknown, malformed, or never existed)
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// The record exists but its bytes are gone from the content store
    #[error("stored file missing for code {0}")]
    MissingStoredFile(String),

    /// Writing upload bytes to the content store failed; nothing was persisted
    #[error("content store write failed: {0}")]
    StorageWrite(String),

    /// The record store rejected a save or lookup (including a code collision)
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Malformed request (e.g. an upload without a file part)
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for the two "nothing to hand back" outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::InvalidCode(_) | AppError::MissingStoredFile(_))
    }
}

/// A specialized Result type for Flingo logic.
pub type Result<T> = std::result::Result<T, AppError>;
