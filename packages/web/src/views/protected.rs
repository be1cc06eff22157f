//! Layout for every page that needs a signed-in user.

use dioxus::prelude::*;
use ui::icons::{FaGear, FaListUl};
use ui::icons::FaArrowsRotate;
use ui::{
    fetch_auth_state, use_auth, AccessGuard, AccessProvider, CalculationsProvider, Icon,
    LogoutButton,
};

use crate::Route;

/// Redirects anonymous visitors to `/login`, then gates the page on access
/// and provides the calculations context. A session that could not be
/// checked shows the error instead of redirecting.
#[component]
pub fn Protected() -> Element {
    let mut auth = use_auth();
    let navigator = use_navigator();

    let state = auth();
    if state.loading {
        return rsx! {
            div { class: "view-loading", "Loading..." }
        };
    }
    if let Some(error) = state.error {
        return rsx! {
            div {
                class: "view-page",
                p { class: "view-error", role: "alert", "{error}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| async move {
                        auth.set(fetch_auth_state().await);
                    },
                    Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                    " Retry"
                }
            }
        };
    }
    let Some(user) = state.user else {
        navigator.replace(Route::Login {});
        return rsx! {};
    };

    rsx! {
        AccessProvider {
            AccessGuard {
                CalculationsProvider {
                    nav {
                        class: "portal-nav",
                        Link {
                            to: Route::Calculations {},
                            class: "portal-nav-link",
                            Icon { icon: FaListUl, width: 14, height: 14 }
                            " Calculations"
                        }
                        Link {
                            to: Route::Settings {},
                            class: "portal-nav-link",
                            Icon { icon: FaGear, width: 14, height: 14 }
                            " Settings"
                        }
                        span { class: "portal-nav-user", "{user.display_name()}" }
                        LogoutButton { class: "btn btn-secondary" }
                    }
                    main {
                        class: "portal-main",
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}
