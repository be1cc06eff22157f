use dioxus::prelude::*;
use ui::views::{CalculationDetailView, CalculationsView};

use crate::Route;

#[component]
pub fn Calculations() -> Element {
    let nav = use_navigator();

    rsx! {
        CalculationsView {
            on_open: move |id: String| {
                nav.push(Route::CalculationDetail { id });
            },
        }
    }
}

#[component]
pub fn CalculationDetail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        CalculationDetailView {
            id,
            on_navigate_list: move |_| {
                nav.push(Route::Calculations {});
            },
        }
    }
}
