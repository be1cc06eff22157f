//! Account utilities built on [`BackendClient`].
//!
//! Both functions fail with an [`Error`] that callers translate into a
//! user-facing message; nothing here swallows a rejected request.

use crate::backend::BackendClient;
use crate::error::{Error, Result};
use crate::models::UserInfo;

/// Change the signed-in user's password.
///
/// The user is re-authenticated with `current_password` first. A wrong
/// password fails with [`Error::Authentication`] and the backend's
/// password update is never called.
pub async fn change_password<B: BackendClient>(
    backend: &B,
    current_password: &str,
    new_password: &str,
) -> Result<()> {
    let user = backend.current_user().await?.ok_or(Error::NotAuthenticated)?;

    backend
        .sign_in(&user.email, current_password)
        .await
        .map_err(|e| match e {
            Error::Authentication(_) => {
                Error::Authentication("Current password is incorrect".to_string())
            }
            other => other,
        })?;

    backend.update_password(new_password).await?;
    tracing::info!(user_id = %user.id, "password changed");
    Ok(())
}

/// Change the signed-in user's email address.
pub async fn change_email<B: BackendClient>(backend: &B, new_email: &str) -> Result<UserInfo> {
    if backend.current_user().await?.is_none() {
        return Err(Error::NotAuthenticated);
    }
    let user = backend.update_email(new_email).await?;
    tracing::info!(user_id = %user.id, "email changed");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::testing::{Call, RecordingBackend};

    fn signed_in() -> RecordingBackend {
        let backend = RecordingBackend::new();
        backend
            .inner
            .add_user("consultant@example.com", "old-secret", Role::Consultant);
        backend
    }

    #[tokio::test]
    async fn test_wrong_current_password_never_updates() {
        let backend = signed_in();
        backend
            .inner
            .sign_in("consultant@example.com", "old-secret")
            .await
            .unwrap();

        let err = change_password(&backend, "not-it", "new-secret")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Authentication(_)));
        assert_eq!(err.to_string(), "Current password is incorrect");
        assert!(!backend.calls().contains(&Call::UpdatePassword));
    }

    #[tokio::test]
    async fn test_backend_failure_during_reauthentication_is_not_a_wrong_password() {
        let backend = signed_in();
        backend
            .inner
            .sign_in("consultant@example.com", "old-secret")
            .await
            .unwrap();
        let outage = Error::Backend("Database error: pool timed out".to_string());
        backend.fail_sign_in(outage.clone());

        let err = change_password(&backend, "old-secret", "new-secret")
            .await
            .unwrap_err();

        assert_eq!(err, outage);
        assert!(!backend.calls().contains(&Call::UpdatePassword));
    }

    #[tokio::test]
    async fn test_change_password() {
        let backend = signed_in();
        backend
            .inner
            .sign_in("consultant@example.com", "old-secret")
            .await
            .unwrap();

        change_password(&backend, "old-secret", "new-secret")
            .await
            .unwrap();

        assert!(backend.calls().contains(&Call::UpdatePassword));
        backend.inner.sign_out().await.unwrap();
        assert!(backend
            .inner
            .sign_in("consultant@example.com", "new-secret")
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_account_changes_need_a_session() {
        let backend = signed_in();

        assert_eq!(
            change_password(&backend, "old-secret", "new-secret")
                .await
                .unwrap_err(),
            Error::NotAuthenticated
        );
        assert_eq!(
            change_email(&backend, "x@example.com").await.unwrap_err(),
            Error::NotAuthenticated
        );
        assert!(!backend.calls().contains(&Call::UpdatePassword));
    }

    #[tokio::test]
    async fn test_change_email() {
        let backend = signed_in();
        backend
            .inner
            .sign_in("consultant@example.com", "old-secret")
            .await
            .unwrap();

        let user = change_email(&backend, "Renamed@Example.com").await.unwrap();
        assert_eq!(user.email, "renamed@example.com");
    }
}
