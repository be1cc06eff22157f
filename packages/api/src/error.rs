//! Server-side error type for the portal's server functions.

use dioxus::prelude::ServerFnError;
use thiserror::Error;

/// Failures inside a server function, converted to [`ServerFnError`] at the
/// boundary. The `Display` text is what the client ends up showing.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Note not found")]
    NoteNotFound,

    #[error("Calculation not found")]
    CalculationNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(e: tower_sessions::session::Error) -> Self {
        ApiError::Session(e.to_string())
    }
}

impl From<ApiError> for ServerFnError {
    fn from(e: ApiError) -> Self {
        if let ApiError::Database(ref inner) = e {
            tracing::error!("database error: {}", inner);
        }
        ServerFnError::new(e.to_string())
    }
}
