//! Platform-neutral core of the consultation portal: models, the backend
//! client boundary, the note-session state machine and access decisions.

pub mod access;
pub mod auth;
pub mod backend;
pub mod calculations;
pub mod config;
pub mod editor;
pub mod error;
pub mod models;

mod memory;
pub use memory::MemoryBackend;

#[cfg(test)]
mod testing;

pub use access::{AccessDecision, AccessPolicy, AccessPolicyKind, AccessStatus, DenyReason, GateState};
pub use backend::BackendClient;
pub use calculations::{Calculations, SaveRequest};
pub use config::PortalConfig;
pub use editor::{EditorState, NoteSession};
pub use error::{Error, Result};
pub use models::{Calculation, CalculationKind, Note, Profile, Role, UserInfo};
