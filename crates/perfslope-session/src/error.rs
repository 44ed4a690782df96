//! Session store errors.

use thiserror::Error;

use crate::SessionId;

/// Errors returned by a [`SessionStore`](crate::SessionStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live session has this id, either because it never existed or
    /// because it expired.
    #[error("Session expired or invalid: {0}")]
    NotFound(SessionId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
