//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use store::{BackendClient, Profile, UserInfo};

use crate::backend::ServerBackend;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub profile: Option<Profile>,
    pub loading: bool,
    /// Set when the session could not be checked. The user is then unknown,
    /// not signed out.
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            profile: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    try_use_context::<Signal<AuthState>>()
        .unwrap_or_else(|| panic!("use_auth called outside of an AuthProvider"))
}

/// Fetch the session user and profile from the backend.
pub async fn fetch_auth_state() -> AuthState {
    load_auth_state(&ServerBackend).await
}

/// Build the [`AuthState`] from `backend`. A failed lookup yields
/// [`AuthState::failed`], never a signed-out state.
pub async fn load_auth_state<B: BackendClient>(backend: &B) -> AuthState {
    let user = match backend.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => return AuthState::signed_out(),
        Err(e) => {
            tracing::warn!("Failed to load current user: {}", e);
            return AuthState::failed(format!("Could not check your session: {e}"));
        }
    };
    match backend.current_profile().await {
        Ok(profile) => AuthState {
            user: Some(user),
            profile,
            loading: false,
            error: None,
        },
        Err(e) => {
            tracing::warn!("Failed to load profile: {}", e);
            AuthState::failed(format!("Could not load your profile: {e}"))
        }
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user and profile on mount
    let _ = use_resource(move || async move {
        auth_state.set(fetch_auth_state().await);
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match ServerBackend.sign_out().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                // Redirect to login
                #[cfg(target_arch = "wasm32")]
                {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/login");
                    }
                }
            }
            Err(e) => tracing::warn!("Sign out failed: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use store::{Calculation, Error, MemoryBackend, Note, Result, Role};

    use super::*;

    /// Every call fails as if the server were down.
    struct Offline;

    fn offline<T>() -> Result<T> {
        Err(Error::Backend("connection refused".to_string()))
    }

    impl BackendClient for Offline {
        async fn sign_in(&self, _: &str, _: &str) -> Result<UserInfo> {
            offline()
        }
        async fn sign_out(&self) -> Result<()> {
            offline()
        }
        async fn current_user(&self) -> Result<Option<UserInfo>> {
            offline()
        }
        async fn current_profile(&self) -> Result<Option<Profile>> {
            offline()
        }
        async fn update_email(&self, _: &str) -> Result<UserInfo> {
            offline()
        }
        async fn update_password(&self, _: &str) -> Result<()> {
            offline()
        }
        async fn get_note(&self, _: &str) -> Result<Option<Note>> {
            offline()
        }
        async fn create_note(&self, _: &str, _: &str) -> Result<Note> {
            offline()
        }
        async fn update_note(&self, _: &str, _: &str) -> Result<Note> {
            offline()
        }
        async fn list_calculations(&self) -> Result<Vec<Calculation>> {
            offline()
        }
        async fn get_calculation(&self, _: &str) -> Result<Option<Calculation>> {
            offline()
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_not_signed_out() {
        let state = load_auth_state(&Offline).await;

        assert!(!state.loading);
        assert!(!state.is_signed_in());
        assert!(state
            .error
            .as_deref()
            .is_some_and(|e| e.contains("connection refused")));
        assert_ne!(state, AuthState::signed_out());
    }

    #[tokio::test]
    async fn test_load_auth_state() {
        let backend = MemoryBackend::new();
        assert_eq!(load_auth_state(&backend).await, AuthState::signed_out());

        backend.add_user("admin@example.com", "secret-pass", Role::Admin);
        backend
            .sign_in("admin@example.com", "secret-pass")
            .await
            .unwrap();
        let state = load_auth_state(&backend).await;
        assert!(state.is_signed_in());
        assert!(state.error.is_none());
        assert!(state.profile.is_some_and(|p| p.is_admin()));
    }
}
