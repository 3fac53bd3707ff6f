//! Roles and administrative permissions
//!
//! A role is a named, immutable set of permissions; behavior is entirely
//! data-driven, so the closed set of canonical roles below covers the
//! network without any role hierarchy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Administrative permissions gating membership lifecycle changes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Activate a pending or suspended membership
    CanActivateMembership,
    /// Suspend an active membership
    CanSuspendMembership,
    /// Revoke (terminally remove) a membership
    CanRevokeMembership,
    /// Edit the roles on a membership record
    CanModifyPermissions,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::CanActivateMembership => write!(f, "CAN_ACTIVATE_MEMBERSHIP"),
            Permission::CanSuspendMembership => write!(f, "CAN_SUSPEND_MEMBERSHIP"),
            Permission::CanRevokeMembership => write!(f, "CAN_REVOKE_MEMBERSHIP"),
            Permission::CanModifyPermissions => write!(f, "CAN_MODIFY_PERMISSIONS"),
        }
    }
}

/// A named, immutable bundle of administrative permissions
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Role {
    name: String,
    permissions: BTreeSet<Permission>,
}

impl Role {
    /// Create a role with an explicit permission set
    pub fn new(name: impl Into<String>, permissions: BTreeSet<Permission>) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }

    /// The network manager role: holds every administrative permission
    pub fn network_manager() -> Self {
        Self::new(
            "NetworkManager",
            BTreeSet::from([
                Permission::CanActivateMembership,
                Permission::CanSuspendMembership,
                Permission::CanRevokeMembership,
                Permission::CanModifyPermissions,
            ]),
        )
    }

    /// The plain member role: no administrative permissions
    pub fn member() -> Self {
        Self::new("Member", BTreeSet::new())
    }

    /// The role's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The role's permission set
    pub fn permissions(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }

    /// Whether this role grants a permission
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
