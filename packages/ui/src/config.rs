//! Portal configuration as served by the backend.

use dioxus::prelude::*;
use store::PortalConfig;

use crate::icons::FaArrowsRotate;
use crate::Icon;

/// `None` until the configuration has been fetched.
pub type ConfigSignal = Signal<Option<PortalConfig>>;

/// Fetches the portal configuration and provides it to the tree.
///
/// A failed fetch leaves the signal at `None`, so access checks keep waiting,
/// and shows the error with a retry.
#[component]
pub fn ConfigProvider(children: Element) -> Element {
    let mut config: ConfigSignal = use_signal(|| None);
    let mut load_error = use_signal(|| Option::<String>::None);

    let mut loader = use_resource(move || async move {
        match api::get_portal_config().await {
            Ok(loaded) => {
                load_error.set(None);
                config.set(Some(loaded));
            }
            Err(e) => {
                tracing::warn!("Failed to load portal configuration: {}", e);
                load_error.set(Some(e.to_string()));
            }
        }
    });

    use_context_provider(|| config);

    rsx! {
        if let Some(msg) = load_error() {
            div {
                class: "view-error config-error",
                role: "alert",
                span { "Could not load the portal configuration: {msg}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| loader.restart(),
                    Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                    " Retry"
                }
            }
        }
        {children}
    }
}

/// The configuration signal provided by [`ConfigProvider`].
pub fn use_portal_config() -> ConfigSignal {
    try_use_context::<ConfigSignal>()
        .unwrap_or_else(|| panic!("use_portal_config called outside of a ConfigProvider"))
}
