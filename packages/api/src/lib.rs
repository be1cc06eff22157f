//! # API crate: server functions for the consultation portal
//!
//! Every Dioxus server function the web frontend calls lives here, together
//! with the server-side modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | none | Password hashing and the session-to-user lookup |
//! | `config` | `server` | `portal.toml` loaded once per process |
//! | [`db`] | none | PostgreSQL connection pool (lazy `OnceCell` singleton) and migrations |
//! | `error` | `server` | [`ApiError`] and its conversion into `ServerFnError` |
//! | `models` | `server` | `users`, `calculations` and `notes` rows and their client projections |
//! | `queries` | `server` | Scoped SQL for notes, calculations and accounts |
//!
//! ## Server functions exposed here
//!
//! Each public `async fn` below is annotated with `#[get(...)]` or `#[post(...)]`
//! and compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub that forwards
//! the call over HTTP.
//!
//! - **Authentication**: `get_current_user`, `get_profile`, `login_password`, `logout`,
//!   `update_email`, `update_password`
//! - **Notes**: `get_note`, `save_note`, `update_note`
//! - **Calculations**: `list_calculations`, `get_calculation`
//! - **Configuration**: `get_portal_config`
//!
//! Functions that need a user fail with "Not authenticated" when the session
//! holds none.

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
mod queries;

#[cfg(feature = "server")]
pub use error::ApiError;
pub use store::{Calculation, Note, PortalConfig, Profile, UserInfo};

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let user = auth::session_user(&session).await?;
    Ok(user.map(|u| u.to_info()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Get the profile (display name and role) of the current user.
#[cfg(feature = "server")]
#[get("/api/auth/profile", session: tower_sessions::Session)]
pub async fn get_profile() -> Result<Option<Profile>, ServerFnError> {
    let user = auth::session_user(&session).await?;
    Ok(user.map(|u| u.to_profile()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/profile")]
pub async fn get_profile() -> Result<Option<Profile>, ServerFnError> {
    Ok(None)
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    let email = email.trim().to_lowercase();
    let pool = db::get_pool().await?;

    let Some(user) = queries::find_user_by_email(pool, &email).await? else {
        return Err(ApiError::InvalidCredentials.into());
    };
    if !auth::verify_password(&password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials.into());
    }

    auth::remember_user(&session, &user).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(user.to_info())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    let user_id: Option<String> = session
        .get(auth::SESSION_USER_ID_KEY)
        .await
        .map_err(ApiError::from)?;
    session.flush().await.map_err(ApiError::from)?;
    if let Some(user_id) = user_id {
        tracing::info!(user_id = %user_id, "signed out");
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Change the current user's email address.
#[cfg(feature = "server")]
#[post("/api/auth/email", session: tower_sessions::Session)]
pub async fn update_email(new_email: String) -> Result<UserInfo, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let email = queries::normalize_email(&new_email)?;
    let pool = db::get_pool().await?;
    Ok(queries::update_email(pool, user.id, &email).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/email")]
pub async fn update_email(new_email: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace the current user's password.
///
/// Callers re-authenticate with the old password through `login_password`
/// before calling this.
#[cfg(feature = "server")]
#[post("/api/auth/password", session: tower_sessions::Session)]
pub async fn update_password(new_password: String) -> Result<(), ServerFnError> {
    let user = auth::require_user(&session).await?;
    auth::check_new_password(&new_password)?;
    let hash = auth::hash_password(&new_password)?;
    let pool = db::get_pool().await?;
    queries::update_password_hash(pool, user.id, &hash).await?;
    tracing::info!(user_id = %user.id, "password updated");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/password")]
pub async fn update_password(new_password: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Get the note attached to a calculation, if one has been written.
#[cfg(feature = "server")]
#[get("/api/notes/:calculation_id", session: tower_sessions::Session)]
pub async fn get_note(calculation_id: String) -> Result<Option<Note>, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let pool = db::get_pool().await?;
    Ok(queries::get_note(pool, user.session_user(), &calculation_id).await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/notes/:calculation_id")]
pub async fn get_note(calculation_id: String) -> Result<Option<Note>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create the note for a calculation.
#[cfg(feature = "server")]
#[post("/api/notes", session: tower_sessions::Session)]
pub async fn save_note(calculation_id: String, content: String) -> Result<Note, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let pool = db::get_pool().await?;
    Ok(queries::create_note(pool, user.session_user(), &calculation_id, &content).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/notes")]
pub async fn save_note(calculation_id: String, content: String) -> Result<Note, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite the content of an existing note.
#[cfg(feature = "server")]
#[post("/api/notes/update", session: tower_sessions::Session)]
pub async fn update_note(note_id: String, content: String) -> Result<Note, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let pool = db::get_pool().await?;
    Ok(queries::update_note(pool, user.session_user(), &note_id, &content).await?)
}

#[cfg(not(feature = "server"))]
#[post("/api/notes/update")]
pub async fn update_note(note_id: String, content: String) -> Result<Note, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List the calculations visible to the current user, newest first.
#[cfg(feature = "server")]
#[get("/api/calculations", session: tower_sessions::Session)]
pub async fn list_calculations() -> Result<Vec<Calculation>, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let pool = db::get_pool().await?;
    Ok(queries::list_calculations(pool, user.session_user()).await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/calculations")]
pub async fn list_calculations() -> Result<Vec<Calculation>, ServerFnError> {
    Ok(Vec::new())
}

/// Get one calculation by id.
#[cfg(feature = "server")]
#[get("/api/calculations/:id", session: tower_sessions::Session)]
pub async fn get_calculation(id: String) -> Result<Option<Calculation>, ServerFnError> {
    let user = auth::require_user(&session).await?;
    let pool = db::get_pool().await?;
    Ok(queries::get_calculation(pool, user.session_user(), &id).await?)
}

#[cfg(not(feature = "server"))]
#[get("/api/calculations/:id")]
pub async fn get_calculation(id: String) -> Result<Option<Calculation>, ServerFnError> {
    Ok(None)
}

/// The portal configuration the client should follow (access policy, editor).
#[cfg(feature = "server")]
#[get("/api/config")]
pub async fn get_portal_config() -> Result<PortalConfig, ServerFnError> {
    Ok(config::get_config().await?.clone())
}

#[cfg(not(feature = "server"))]
#[get("/api/config")]
pub async fn get_portal_config() -> Result<PortalConfig, ServerFnError> {
    Ok(PortalConfig::default())
}
