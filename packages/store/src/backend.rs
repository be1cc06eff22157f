//! # Backend client: the boundary to the hosted backend
//!
//! [`BackendClient`] is the only way the portal talks to persistent state. It
//! covers authentication (sign-in, session user and profile, email/password
//! changes) and record CRUD for notes and calculations. Every method is one
//! round trip; implementations do no caching.
//!
//! Implementations:
//!
//! - [`crate::MemoryBackend`]: in-process maps, for tests and local development.
//! - `ui::ServerBackend`: forwards each call to an `api` server function.

use std::future::Future;

use crate::error::Result;
use crate::models::{Calculation, Note, Profile, UserInfo};

/// Async interface to the backend that owns users, notes and calculations.
pub trait BackendClient {
    /// Authenticate with email and password and start a session.
    fn sign_in(&self, email: &str, password: &str) -> impl Future<Output = Result<UserInfo>>;

    fn sign_out(&self) -> impl Future<Output = Result<()>>;

    /// The user of the current session, if any.
    fn current_user(&self) -> impl Future<Output = Result<Option<UserInfo>>>;

    /// The profile of the current session user, if any.
    fn current_profile(&self) -> impl Future<Output = Result<Option<Profile>>>;

    fn update_email(&self, new_email: &str) -> impl Future<Output = Result<UserInfo>>;

    fn update_password(&self, new_password: &str) -> impl Future<Output = Result<()>>;

    /// Look up the note attached to a calculation.
    ///
    /// `Ok(None)` means the calculation has no note yet. A calculation the
    /// session user cannot see fails with [`crate::Error::CalculationNotFound`].
    fn get_note(&self, calculation_id: &str) -> impl Future<Output = Result<Option<Note>>>;

    /// Create the note for a calculation. If one already exists it is
    /// overwritten, so a calculation never has two notes. Fails like
    /// [`BackendClient::get_note`] for an unknown calculation.
    fn create_note(
        &self,
        calculation_id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Note>>;

    fn update_note(&self, note_id: &str, content: &str) -> impl Future<Output = Result<Note>>;

    /// Calculations visible to the session user, newest first.
    fn list_calculations(&self) -> impl Future<Output = Result<Vec<Calculation>>>;

    fn get_calculation(&self, id: &str) -> impl Future<Output = Result<Option<Calculation>>>;
}
