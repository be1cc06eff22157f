use dioxus::prelude::*;

use store::auth::{change_email, change_password};

use crate::backend::ServerBackend;
use crate::components::{use_toast, ToastOptions};
use crate::{use_auth, LogoutButton};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Account settings: email, password and sign-out.
#[component]
pub fn SettingsView() -> Element {
    let mut auth = use_auth();
    let toast_api = use_toast();

    let mut new_email = use_signal(String::new);
    let mut email_status = use_signal(|| Option::<String>::None);
    let mut email_saving = use_signal(|| false);

    let mut current_password = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut password_status = use_signal(|| Option::<String>::None);
    let mut password_saving = use_signal(|| false);

    let handle_email = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            email_status.set(None);
            email_saving.set(true);
            match change_email(&ServerBackend, new_email().trim()).await {
                Ok(user) => {
                    auth.write().user = Some(user);
                    new_email.set(String::new());
                    toast_api.success("Email updated".to_string(), ToastOptions::new());
                }
                Err(e) => {
                    tracing::warn!("Email change failed: {}", e);
                    email_status.set(Some(e.to_string()));
                }
            }
            email_saving.set(false);
        });
    };

    let handle_password = move |evt: FormEvent| {
        evt.prevent_default();
        if new_password() != confirm_password() {
            password_status.set(Some("New passwords do not match".to_string()));
            return;
        }
        spawn(async move {
            password_status.set(None);
            password_saving.set(true);
            match change_password(&ServerBackend, &current_password(), &new_password()).await {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    toast_api.success("Password changed".to_string(), ToastOptions::new());
                }
                Err(e) => {
                    tracing::warn!("Password change failed: {}", e);
                    password_status.set(Some(e.to_string()));
                }
            }
            password_saving.set(false);
        });
    };

    let current_email = auth()
        .user
        .map(|u| u.email)
        .unwrap_or_default();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-3xl mx-auto w-full",

            h1 { class: "view-title", "Settings" }

            div {
                class: "mb-8",
                h2 { class: "view-section-title", "Email" }
                p { class: "view-muted", "Signed in as {current_email}" }
                form {
                    class: "settings-form",
                    onsubmit: handle_email,
                    label { r#for: "new-email", "New email" }
                    input {
                        id: "new-email",
                        class: "input",
                        r#type: "email",
                        required: true,
                        value: new_email(),
                        oninput: move |evt: FormEvent| new_email.set(evt.value()),
                    }
                    if let Some(msg) = email_status() {
                        p { class: "form-error", "{msg}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: email_saving(),
                        if email_saving() { "Saving..." } else { "Change email" }
                    }
                }
            }

            div {
                class: "mb-8",
                h2 { class: "view-section-title", "Password" }
                form {
                    class: "settings-form",
                    onsubmit: handle_password,
                    label { r#for: "current-password", "Current password" }
                    input {
                        id: "current-password",
                        class: "input",
                        r#type: "password",
                        autocomplete: "current-password",
                        required: true,
                        value: current_password(),
                        oninput: move |evt: FormEvent| current_password.set(evt.value()),
                    }
                    label { r#for: "new-password", "New password" }
                    input {
                        id: "new-password",
                        class: "input",
                        r#type: "password",
                        autocomplete: "new-password",
                        required: true,
                        value: new_password(),
                        oninput: move |evt: FormEvent| new_password.set(evt.value()),
                    }
                    label { r#for: "confirm-password", "Confirm new password" }
                    input {
                        id: "confirm-password",
                        class: "input",
                        r#type: "password",
                        autocomplete: "new-password",
                        required: true,
                        value: confirm_password(),
                        oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                    }
                    if let Some(msg) = password_status() {
                        p { class: "form-error", "{msg}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: password_saving(),
                        if password_saving() { "Saving..." } else { "Change password" }
                    }
                }
            }

            div {
                class: "mb-8",
                h2 { class: "view-section-title", "Session" }
                LogoutButton { class: "btn btn-secondary" }
            }
        }
    }
}
