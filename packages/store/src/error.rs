//! Error types for portal operations.

use thiserror::Error;

/// Result type alias using the portal's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by a [`crate::BackendClient`] and the services built on it.
///
/// `Clone + PartialEq` so failures can be held inside editor states and
/// compared in tests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Wrong credentials or a rejected re-authentication.
    #[error("{0}")]
    Authentication(String),

    /// The operation needs a signed-in user and there is none.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Calculation not found: {0}")]
    CalculationNotFound(String),

    /// Read or write against the backend failed.
    #[error("Backend error: {0}")]
    Backend(String),
}
