//! Error taxonomy for board operations.
//!
//! Every failure is a synchronous return value. Nothing in the engine retries
//! internally; the host decides how to surface each error to the user.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::codec::CodecError;
use crate::storage::StorageError;

/// Stable machine-readable code for an error, suitable for API responses.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Rejected input: empty titles, non-positive canvas sizes, bad settings.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The operation referenced an id the board does not know.
    #[error("item not found: {0}")]
    NotFound(String),
    /// An id was registered twice. Never silently overwritten.
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    /// Persisted data could not be decoded.
    #[error("malformed data: {0}")]
    Malformed(#[from] CodecError),
    /// The storage backend failed to read or write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for BoardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::Malformed(_) => "E_MALFORMED_DATA",
            Self::Storage(_) => "E_STORAGE",
        }
    }
}
