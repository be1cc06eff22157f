//! # Portal configuration: `portal.toml`
//!
//! The server reads this file once at start-up (path from `PORTAL_CONFIG`,
//! default [`PortalConfig::filename`]) and hands it to clients through the
//! `get_portal_config` server function, so the access policy and editor
//! behaviour are decided in one place.
//!
//! ## Structure
//!
//! ```toml
//! [access]
//! policy = "open"            # or "admin_only"
//!
//! [editor]
//! saved_notice_secs = 3      # how long the "Saved" acknowledgment stays visible
//!
//! [session]
//! secure_cookies = false
//! expiry_days = 7
//! ```
//!
//! All sections derive `Default`, so a missing or empty file is equivalent to
//! the default configuration.

use serde::{Deserialize, Serialize};

use crate::access::AccessPolicyKind;

/// Top-level configuration stored in `portal.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Access-control configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub policy: AccessPolicyKind,
}

/// Note editor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Seconds the "Saved" acknowledgment stays visible. 0 keeps it until the next edit.
    #[serde(default = "default_saved_notice_secs")]
    pub saved_notice_secs: u32,
}

fn default_saved_notice_secs() -> u32 {
    3
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            saved_notice_secs: default_saved_notice_secs(),
        }
    }
}

/// Session cookie configuration, used by the server only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Mark the session cookie `Secure`. Enable behind HTTPS.
    #[serde(default)]
    pub secure_cookies: bool,
    /// Inactivity expiry in days.
    #[serde(default = "default_expiry_days")]
    pub expiry_days: u32,
}

fn default_expiry_days() -> u32 {
    7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: false,
            expiry_days: default_expiry_days(),
        }
    }
}

impl PortalConfig {
    /// Builder method to set the access policy.
    pub fn with_policy(mut self, policy: AccessPolicyKind) -> Self {
        self.access.policy = policy;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "portal.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
