//! # Access context and route guard
//!
//! [`AccessProvider`] derives an [`AccessStatus`] from the signed-in profile
//! and the configured policy, and provides it as a memo so it recomputes
//! whenever either changes. [`AccessGuard`] renders its children only once the
//! status says `Allowed`.
//!
//! Both hooks panic when used outside their provider: a guard without a
//! provider is a wiring bug, not a runtime condition.

use dioxus::prelude::*;
use store::{AccessStatus, DenyReason, GateState, PortalConfig};

use crate::auth::{use_auth, AuthState, LogoutButton};
use crate::config::use_portal_config;
use crate::icons::FaLock;
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Access for `auth` under `config`. Stays loading until both are known.
pub(crate) fn access_status(auth: &AuthState, config: Option<&PortalConfig>) -> AccessStatus {
    match config {
        Some(config) if !auth.loading && auth.error.is_none() => {
            AccessStatus::resolve(auth.profile.as_ref(), &config.access.policy)
        }
        _ => AccessStatus::loading(),
    }
}

/// Provides the access status to its subtree.
#[component]
pub fn AccessProvider(children: Element) -> Element {
    let auth = use_auth();
    let config = use_portal_config();

    let status = use_memo(move || access_status(&auth(), config().as_ref()));

    use_context_provider(|| status);

    rsx! {
        {children}
    }
}

/// The access status provided by the nearest [`AccessProvider`].
pub fn use_access() -> Memo<AccessStatus> {
    try_use_context::<Memo<AccessStatus>>()
        .unwrap_or_else(|| panic!("use_access called outside of an AccessProvider"))
}

/// Renders `children` only when access is granted.
#[component]
pub fn AccessGuard(children: Element) -> Element {
    let access = use_access();

    match access().gate() {
        GateState::Loading => rsx! {
            div { class: "view-loading", "Checking access..." }
        },
        GateState::Allow => rsx! {
            {children}
        },
        GateState::Deny(reason) => rsx! {
            AccessDenied { reason }
        },
    }
}

/// Shown in place of a guarded page. Offers a sign-out so another account
/// can be used.
#[component]
pub fn AccessDenied(reason: DenyReason) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page access-denied",
            Icon { icon: FaLock, width: 24, height: 24 }
            h1 { class: "view-title", "Access denied" }
            p { class: "view-muted", "{reason.message()}" }
            LogoutButton { label: "Sign in with another account", class: "btn btn-secondary" }
        }
    }
}
