use dioxus::prelude::*;

use crate::calculations::use_calculations;
use crate::icons::{FaArrowLeft, FaArrowsRotate};
use crate::{CalculationResults, Icon, NoteEditor};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// One calculation: its results and the consultant's note.
#[component]
pub fn CalculationDetailView(
    id: String,
    /// Called when the user goes back to the list.
    on_navigate_list: EventHandler<()>,
) -> Element {
    // Track the id in a signal so the resource re-runs on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let calculations = use_calculations();
    let mut calculation = use_resource(move || {
        let id = id_signal();
        async move {
            calculations
                .get_calculation(&id)
                .await
                .inspect_err(|e| tracing::warn!("Failed to load calculation {}: {}", id, e))
        }
    });

    let body = match &*calculation.read() {
        None => rsx! { div { class: "view-loading", "Loading calculation..." } },
        Some(Err(e)) => rsx! {
            div {
                class: "view-error",
                p { "Could not load the calculation: {e}" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| calculation.restart(),
                    Icon { icon: FaArrowsRotate, width: 12, height: 12 }
                    " Retry"
                }
            }
        },
        Some(Ok(None)) => rsx! {
            p { class: "view-muted", "Calculation not found." }
        },
        Some(Ok(Some(calc))) => rsx! {
            h1 { class: "view-title", "{calc.client_name}" }
            p { class: "view-muted", "{calc.kind.label()} calculation" }
            CalculationResults { calculation: calc.clone() }
            NoteEditor { key: "{calc.id}", calculation_id: calc.id.clone() }
        },
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page max-w-3xl mx-auto w-full",
            button {
                class: "btn btn-ghost",
                onclick: move |_| on_navigate_list.call(()),
                Icon { icon: FaArrowLeft, width: 12, height: 12 }
                " All calculations"
            }
            {body}
        }
    }
}
