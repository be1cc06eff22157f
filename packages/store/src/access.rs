//! # Access decisions
//!
//! The route gate asks one question: may the current profile see protected
//! pages? The answer is an [`AccessDecision`] rather than a boolean so a denial
//! always carries a reason the UI can explain.
//!
//! [`AccessPolicyKind`] is the configured policy (`[access] policy` in
//! `portal.toml`). `Open` grants everyone; `AdminOnly` restricts the portal to
//! admins. Tiered or subscription-based access plugs in as another
//! [`AccessPolicy`] implementation.

use serde::{Deserialize, Serialize};

use crate::models::{Profile, Role};

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The user has no resolved profile.
    NoProfile,
    /// The policy requires the admin role.
    AdminRequired,
}

impl DenyReason {
    pub fn message(&self) -> &'static str {
        match self {
            DenyReason::NoProfile => "Your account has no portal profile yet.",
            DenyReason::AdminRequired => "This portal is restricted to administrators.",
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenyReason),
}

/// Decides access for a (possibly absent) profile.
pub trait AccessPolicy {
    fn decide(&self, profile: Option<&Profile>) -> AccessDecision;
}

/// Policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPolicyKind {
    /// Everyone is allowed.
    #[default]
    Open,
    /// Only profiles with the admin role are allowed.
    AdminOnly,
}

impl AccessPolicy for AccessPolicyKind {
    fn decide(&self, profile: Option<&Profile>) -> AccessDecision {
        match self {
            AccessPolicyKind::Open => AccessDecision::Allowed,
            AccessPolicyKind::AdminOnly => match profile {
                None => AccessDecision::Denied(DenyReason::NoProfile),
                Some(p) if p.role == Role::Admin => AccessDecision::Allowed,
                Some(_) => AccessDecision::Denied(DenyReason::AdminRequired),
            },
        }
    }
}

/// What the route gate should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Allow,
    Deny(DenyReason),
}

/// Derived access state exposed to the component tree. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessStatus {
    pub loading: bool,
    pub is_admin: bool,
    /// `None` while loading.
    pub decision: Option<AccessDecision>,
}

impl AccessStatus {
    /// Status before the profile and policy have resolved.
    pub fn loading() -> Self {
        Self {
            loading: true,
            is_admin: false,
            decision: None,
        }
    }

    /// Resolve the status for a profile under a policy.
    pub fn resolve(profile: Option<&Profile>, policy: &impl AccessPolicy) -> Self {
        Self {
            loading: false,
            is_admin: profile.is_some_and(Profile::is_admin),
            decision: Some(policy.decide(profile)),
        }
    }

    pub fn has_access(&self) -> bool {
        !self.loading && self.decision == Some(AccessDecision::Allowed)
    }

    pub fn gate(&self) -> GateState {
        match (self.loading, self.decision) {
            (false, Some(AccessDecision::Allowed)) => GateState::Allow,
            (false, Some(AccessDecision::Denied(reason))) => GateState::Deny(reason),
            _ => GateState::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role) -> Profile {
        Profile {
            user_id: "user-1".to_string(),
            display_name: None,
            role,
        }
    }

    #[test]
    fn test_is_admin_only_for_admin_role() {
        let open = AccessPolicyKind::Open;
        assert!(AccessStatus::resolve(Some(&profile(Role::Admin)), &open).is_admin);
        assert!(!AccessStatus::resolve(Some(&profile(Role::Consultant)), &open).is_admin);
        assert!(!AccessStatus::resolve(Some(&profile(Role::Unknown)), &open).is_admin);
        assert!(!AccessStatus::resolve(None, &open).is_admin);
    }

    #[test]
    fn test_open_policy_always_allows() {
        let open = AccessPolicyKind::Open;
        for p in [
            None,
            Some(profile(Role::Admin)),
            Some(profile(Role::Consultant)),
            Some(profile(Role::Unknown)),
        ] {
            let status = AccessStatus::resolve(p.as_ref(), &open);
            assert!(status.has_access());
            assert_eq!(status.gate(), GateState::Allow);
        }
    }

    #[test]
    fn test_admin_only_policy() {
        let policy = AccessPolicyKind::AdminOnly;
        assert_eq!(
            policy.decide(Some(&profile(Role::Admin))),
            AccessDecision::Allowed
        );
        assert_eq!(
            policy.decide(Some(&profile(Role::Consultant))),
            AccessDecision::Denied(DenyReason::AdminRequired)
        );
        assert_eq!(
            policy.decide(None),
            AccessDecision::Denied(DenyReason::NoProfile)
        );

        let status = AccessStatus::resolve(Some(&profile(Role::Consultant)), &policy);
        assert!(!status.has_access());
        assert_eq!(status.gate(), GateState::Deny(DenyReason::AdminRequired));
    }

    #[test]
    fn test_loading_status_renders_nothing_protected() {
        let status = AccessStatus::loading();
        assert!(!status.has_access());
        assert!(!status.is_admin);
        assert_eq!(status.gate(), GateState::Loading);
    }
}
