use dioxus::prelude::*;

use crate::calculations::use_calculations;
use crate::icons::FaArrowsRotate;
use crate::{CalculationCard, Icon};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The signed-in consultant's calculations, newest first.
#[component]
pub fn CalculationsView(
    /// Called with a calculation id when a card is opened.
    on_open: EventHandler<String>,
) -> Element {
    let calculations = use_calculations();
    let mut list = use_resource(move || async move {
        calculations
            .list_calculations()
            .await
            .inspect_err(|e| tracing::warn!("Failed to load calculations: {}", e))
    });

    let body = match &*list.read() {
        None => rsx! { div { class: "view-loading", "Loading calculations..." } },
        Some(Err(e)) => rsx! {
            div {
                class: "view-error",
                p { "Could not load calculations: {e}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| list.restart(),
                    Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                    " Retry"
                }
            }
        },
        Some(Ok(items)) if items.is_empty() => rsx! {
            p { class: "view-muted", "No calculations yet." }
        },
        Some(Ok(items)) => rsx! {
            div {
                class: "calc-list",
                for calculation in items.iter() {
                    CalculationCard {
                        key: "{calculation.id}",
                        calculation: calculation.clone(),
                        onclick: move |id| on_open.call(id),
                    }
                }
            }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-3xl mx-auto w-full",
            h1 { class: "view-title", "Calculations" }
            {body}
        }
    }
}
