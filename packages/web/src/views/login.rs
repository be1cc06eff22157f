//! Login page: email and password.

use dioxus::prelude::*;
use store::BackendClient;
use ui::{fetch_auth_state, use_auth, ServerBackend};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    // If already logged in, go to the calculations
    if !auth().loading && auth().is_signed_in() {
        nav.replace(Route::Calculations {});
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            submitting.set(true);
            match ServerBackend.sign_in(email().trim(), &password()).await {
                Ok(_) => {
                    auth.set(fetch_auth_state().await);
                    password.set(String::new());
                    nav.replace(Route::Calculations {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",

            h1 { class: "login-title", "Numerology Portal" }
            p { class: "login-subtitle", "Sign in to your consultant account" }

            form {
                class: "login-form",
                onsubmit: handle_submit,

                label { r#for: "email", "Email" }
                input {
                    id: "email",
                    class: "input",
                    r#type: "email",
                    autocomplete: "username",
                    required: true,
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                label { r#for: "password", "Password" }
                input {
                    id: "password",
                    class: "input",
                    r#type: "password",
                    autocomplete: "current-password",
                    required: true,
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                if let Some(msg) = error() {
                    p { class: "form-error", "{msg}" }
                }

                button {
                    class: "btn btn-primary login-btn",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
