//! Local (email + password) authentication: password hashing and the
//! session-to-user lookup.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use password::{check_new_password, hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{remember_user, require_user, session_user, SessionUser, SESSION_USER_ID_KEY};
