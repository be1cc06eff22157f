use dioxus::prelude::*;
use store::Calculation;

/// List entry for one calculation.
#[component]
pub fn CalculationCard(calculation: Calculation, onclick: EventHandler<String>) -> Element {
    let id = calculation.id.clone();
    let created = calculation
        .created_at
        .split('T')
        .next()
        .unwrap_or_default()
        .to_string();

    rsx! {
        button {
            class: "calc-card",
            onclick: move |_| onclick.call(id.clone()),
            div {
                class: "calc-card-header",
                span { class: "calc-card-name", "{calculation.client_name}" }
                span { class: "calc-card-kind", "{calculation.kind.label()}" }
            }
            div {
                class: "calc-card-meta",
                span { "Born {calculation.birth_date}" }
                if let Some(partner) = &calculation.partner_name {
                    span { " · with {partner}" }
                }
                span { class: "calc-card-date", "{created}" }
            }
        }
    }
}
