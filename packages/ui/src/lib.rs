//! This crate contains all shared UI for the portal: the server-backed
//! backend client, the auth, config, access and calculations contexts, and
//! the views built on them.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

mod timer;

mod backend;
pub use backend::ServerBackend;

mod auth;
pub use auth::{fetch_auth_state, load_auth_state, use_auth, AuthProvider, AuthState, LogoutButton};

mod config;
pub use config::{use_portal_config, ConfigProvider, ConfigSignal};

mod access;
pub use access::{use_access, AccessDenied, AccessGuard, AccessProvider};

mod calculations;
pub use calculations::{use_calculations, CalculationsProvider, PortalCalculations};

mod note_editor;
pub use note_editor::NoteEditor;

mod calculation_card;
pub use calculation_card::CalculationCard;

mod calculation_results;
pub use calculation_results::CalculationResults;
