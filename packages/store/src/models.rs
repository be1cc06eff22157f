//! # Domain models for the consultation portal
//!
//! Defines the records exchanged between the portal UI and its backend client.
//! Every type is `Serialize + Deserialize` so it can cross the server/client
//! boundary via Dioxus server functions, and `PartialEq` so it can be used as a
//! component prop. Identifiers are plain strings (UUIDs on the hosted backend)
//! which keeps the models WASM-friendly.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserInfo`] | The signed-in identity. Read-only for the lifetime of a session. |
//! | [`Profile`] | Extended user attributes; carries the [`Role`] used for access decisions. |
//! | [`Note`] | A free-text annotation. At most one per calculation. |
//! | [`Calculation`] | A stored numerology result for a client. Read-only from the UI. |

use serde::{Deserialize, Serialize};

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Portal role of a user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Consultant,
    /// Any role string the portal does not recognise.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Parse a stored role column. Unrecognised values map to [`Role::Unknown`].
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            "consultant" => Role::Consultant,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Consultant => "consultant",
            Role::Unknown => "unknown",
        }
    }
}

/// Extended user record used for authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub role: Role,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Free-text annotation attached to one calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: String,
    pub calculation_id: String,
    pub content: String,
    /// RFC 3339 timestamp of the last write.
    pub updated_at: String,
}

/// The kind of numerology computation a calculation holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalculationKind {
    Basic,
    Partnership,
    Target,
}

impl CalculationKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "basic" => Some(CalculationKind::Basic),
            "partnership" => Some(CalculationKind::Partnership),
            "target" => Some(CalculationKind::Target),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::Basic => "Basic",
            CalculationKind::Partnership => "Partnership",
            CalculationKind::Target => "Target",
        }
    }
}

/// A stored numerology computation result tied to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Calculation {
    pub id: String,
    pub kind: CalculationKind,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub client_name: String,
    pub birth_date: String,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub partner_birth_date: Option<String>,
    #[serde(default)]
    pub target_date: Option<String>,
    /// Named numerology values, e.g. `{"life_path": 7}`.
    #[serde(default)]
    pub results: serde_json::Value,
}

impl Calculation {
    /// Flatten `results` into display rows, sorted by key.
    pub fn result_rows(&self) -> Vec<(String, String)> {
        match &self.results {
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(key, value)| {
                    let shown = match value {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (key.replace('_', " "), shown)
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
