use dioxus::prelude::*;
use store::Calculation;

/// Table of a calculation's inputs and numerology values.
#[component]
pub fn CalculationResults(calculation: Calculation) -> Element {
    let rows = calculation.result_rows();

    rsx! {
        div {
            class: "calc-results",
            dl {
                class: "calc-inputs",
                dt { "Client" }
                dd { "{calculation.client_name}" }
                dt { "Birth date" }
                dd { "{calculation.birth_date}" }
                if let Some(partner) = &calculation.partner_name {
                    dt { "Partner" }
                    dd { "{partner}" }
                }
                if let Some(date) = &calculation.partner_birth_date {
                    dt { "Partner birth date" }
                    dd { "{date}" }
                }
                if let Some(date) = &calculation.target_date {
                    dt { "Target date" }
                    dd { "{date}" }
                }
            }
            if rows.is_empty() {
                p { class: "view-muted", "This calculation has no results." }
            } else {
                table {
                    class: "calc-table",
                    tbody {
                        for (name, value) in rows {
                            tr {
                                key: "{name}",
                                th { "{name}" }
                                td { "{value}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
