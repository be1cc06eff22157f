//! [`BackendClient`] over the `api` server functions.

use dioxus::prelude::ServerFnError;
use store::{BackendClient, Calculation, Error, Note, Profile, Result, UserInfo};

const NOT_AUTHENTICATED: &str = "Not authenticated";
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const NOTE_NOT_FOUND: &str = "Note not found";
const CALCULATION_NOT_FOUND: &str = "Calculation not found";

/// The hosted backend, reached through HTTP server function calls.
///
/// Stateless: the session lives in the browser's cookie.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ServerBackend;

/// Map a server function failure onto the portal error type.
fn backend_error(e: ServerFnError) -> Error {
    let message = e.to_string();
    if message.contains(NOT_AUTHENTICATED) {
        Error::NotAuthenticated
    } else if message.contains(NOTE_NOT_FOUND) {
        Error::NoteNotFound(message)
    } else {
        Error::Backend(message)
    }
}

/// Only rejected credentials are authentication errors; outages stay backend failures.
fn sign_in_error(e: ServerFnError) -> Error {
    if e.to_string().contains(INVALID_CREDENTIALS) {
        Error::Authentication(INVALID_CREDENTIALS.to_string())
    } else {
        backend_error(e)
    }
}

/// Failures of the calls scoped to one calculation.
fn calculation_error(calculation_id: &str, e: ServerFnError) -> Error {
    if e.to_string().contains(CALCULATION_NOT_FOUND) {
        Error::CalculationNotFound(calculation_id.to_string())
    } else {
        backend_error(e)
    }
}

impl BackendClient for ServerBackend {
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserInfo> {
        api::login_password(email.to_string(), password.to_string())
            .await
            .map_err(sign_in_error)
    }

    async fn sign_out(&self) -> Result<()> {
        api::logout().await.map_err(backend_error)
    }

    async fn current_user(&self) -> Result<Option<UserInfo>> {
        api::get_current_user().await.map_err(backend_error)
    }

    async fn current_profile(&self) -> Result<Option<Profile>> {
        api::get_profile().await.map_err(backend_error)
    }

    async fn update_email(&self, new_email: &str) -> Result<UserInfo> {
        api::update_email(new_email.to_string())
            .await
            .map_err(backend_error)
    }

    async fn update_password(&self, new_password: &str) -> Result<()> {
        api::update_password(new_password.to_string())
            .await
            .map_err(backend_error)
    }

    async fn get_note(&self, calculation_id: &str) -> Result<Option<Note>> {
        api::get_note(calculation_id.to_string())
            .await
            .map_err(|e| calculation_error(calculation_id, e))
    }

    async fn create_note(&self, calculation_id: &str, content: &str) -> Result<Note> {
        api::save_note(calculation_id.to_string(), content.to_string())
            .await
            .map_err(|e| calculation_error(calculation_id, e))
    }

    async fn update_note(&self, note_id: &str, content: &str) -> Result<Note> {
        api::update_note(note_id.to_string(), content.to_string())
            .await
            .map_err(|e| match backend_error(e) {
                Error::NoteNotFound(_) => Error::NoteNotFound(note_id.to_string()),
                other => other,
            })
    }

    async fn list_calculations(&self) -> Result<Vec<Calculation>> {
        api::list_calculations().await.map_err(backend_error)
    }

    async fn get_calculation(&self, id: &str) -> Result<Option<Calculation>> {
        api::get_calculation(id.to_string())
            .await
            .map_err(backend_error)
    }
}
