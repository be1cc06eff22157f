//! Calculations context: one [`Calculations`] handle per provided subtree.

use dioxus::prelude::*;
use store::Calculations;

use crate::backend::ServerBackend;

pub type PortalCalculations = Calculations<ServerBackend>;

/// Provides a server-backed [`Calculations`] handle to its children.
#[component]
pub fn CalculationsProvider(children: Element) -> Element {
    use_context_provider(|| Calculations::new(ServerBackend));

    rsx! {
        {children}
    }
}

/// The handle provided by the nearest [`CalculationsProvider`].
pub fn use_calculations() -> PortalCalculations {
    try_use_context::<PortalCalculations>()
        .unwrap_or_else(|| panic!("use_calculations called outside of a CalculationsProvider"))
}
