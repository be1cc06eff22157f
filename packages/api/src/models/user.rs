//! # User row
//!
//! [`User`] is the full `users` row, loaded with [`sqlx::FromRow`]. It carries
//! the Argon2 `password_hash` and therefore never leaves the server. Clients
//! receive one of two projections from `store`:
//!
//! - [`UserInfo`] via [`User::to_info`] (identity),
//! - [`Profile`] via [`User::to_profile`] (display name and role).
//!
//! `role` is free text in the database; anything other than `admin` or
//! `consultant` becomes [`Role::Unknown`].

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::{Profile, Role, UserInfo};
use uuid::Uuid;

use crate::auth::SessionUser;

/// Full user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }

    /// Convert to UserInfo for client consumption.
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.to_string(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    pub fn to_profile(&self) -> Profile {
        Profile {
            user_id: self.id.to_string(),
            display_name: self.name.clone(),
            role: self.role(),
        }
    }

    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            role: self.role(),
        }
    }
}
