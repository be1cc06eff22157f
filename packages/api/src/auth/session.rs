//! Session data and the session-to-user lookup used by every protected
//! server function.

use store::Role;
use tower_sessions::Session;
use uuid::Uuid;

use crate::db::get_pool;
use crate::error::ApiError;
use crate::models::User;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// The signed-in user as resolved from the session and the `users` table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionUser {
    pub id: Uuid,
    pub role: Role,
}

impl SessionUser {
    /// Admins see every consultant's records.
    pub fn sees_all(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Load the user whose id is stored in the session, if any.
///
/// A session pointing at a deleted user or holding a malformed id is treated
/// as signed out.
pub async fn session_user(session: &Session) -> Result<Option<User>, ApiError> {
    let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    let Some(user_id) = user_id else {
        return Ok(None);
    };
    let Ok(user_uuid) = Uuid::parse_str(&user_id) else {
        tracing::warn!("discarding malformed session user id");
        return Ok(None);
    };

    let pool = get_pool().await?;
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(user_uuid)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Like [`session_user`], but a missing session is [`ApiError::NotAuthenticated`].
pub async fn require_user(session: &Session) -> Result<User, ApiError> {
    session_user(session)
        .await?
        .ok_or(ApiError::NotAuthenticated)
}

/// Remember `user` in the session.
pub async fn remember_user(session: &Session, user: &User) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user.id.to_string())
        .await?;
    Ok(())
}
