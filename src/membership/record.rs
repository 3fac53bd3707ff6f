//! Membership records and the lifecycle state machine
//!
//! A record is created `PENDING` by an admission request, moved between
//! statuses by permission-gated transitions, and consumed on revocation
//! (there is no revoked status; the record is removed). The record itself
//! never authorizes anything: the `can_*` predicates answer truthfully
//! about the holder's derived permissions and the verification layer
//! enforces the answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::roles::{Permission, Role};
use crate::types::{MembershipError, Result};

/// Admission status of a membership record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum MembershipStatus {
    /// Requested, not yet admitted; cannot transact
    Pending,
    /// Admitted; may transact on the network
    Active,
    /// Temporarily barred; cannot transact
    Suspended,
}

impl MembershipStatus {
    /// Permission the acting party needs to move a record `from -> to`
    ///
    /// `None` means the transition is never directly authorized
    /// (e.g. PENDING -> SUSPENDED). Reactivation reuses the activation
    /// permission. Revocation is not a status; see
    /// [`revocation_requirement`](Self::revocation_requirement).
    pub fn transition_requirement(
        from: MembershipStatus,
        to: MembershipStatus,
    ) -> Option<Permission> {
        use MembershipStatus::*;
        match (from, to) {
            (Pending, Active) | (Suspended, Active) => Some(Permission::CanActivateMembership),
            (Active, Suspended) => Some(Permission::CanSuspendMembership),
            _ => None,
        }
    }

    /// Permission the acting party needs to revoke a record from any status
    pub fn revocation_requirement() -> Permission {
        Permission::CanRevokeMembership
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipStatus::Pending => write!(f, "PENDING"),
            MembershipStatus::Active => write!(f, "ACTIVE"),
            MembershipStatus::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

/// Lifecycle record for one party's membership on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    /// Stable identifier, unchanged across status changes
    linear_id: Uuid,
    /// The owning party
    identity: String,
    /// Network this membership belongs to
    network_id: String,
    /// Current admission status
    status: MembershipStatus,
    /// Roles held by the member
    roles: BTreeSet<Role>,
    /// When the record was issued
    issued: DateTime<Utc>,
    /// When the record was last changed; never precedes `issued`
    modified: DateTime<Utc>,
    /// Parties entitled to observe and co-sign changes to this record
    participants: Vec<String>,
}

impl MembershipRecord {
    /// Create the record for a new admission request
    ///
    /// Starts `PENDING` with the plain member role.
    pub fn pending_request(
        identity: impl Into<String>,
        network_id: impl Into<String>,
        participants: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            linear_id: Uuid::new_v4(),
            identity: identity.into(),
            network_id: network_id.into(),
            status: MembershipStatus::Pending,
            roles: BTreeSet::from([Role::member()]),
            issued: now,
            modified: now,
            participants,
        }
    }

    /// Stable record identifier
    pub fn linear_id(&self) -> Uuid {
        self.linear_id
    }

    /// The owning party
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Network this membership belongs to
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Current admission status
    pub fn status(&self) -> MembershipStatus {
        self.status
    }

    /// Roles held by the member
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// When the record was issued
    pub fn issued(&self) -> DateTime<Utc> {
        self.issued
    }

    /// When the record was last changed
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Parties entitled to observe and co-sign changes
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Union of permissions across the record's roles
    pub fn permissions(&self) -> BTreeSet<Permission> {
        self.roles
            .iter()
            .flat_map(|role| role.permissions().iter().copied())
            .collect()
    }

    fn holds(&self, permission: Permission) -> bool {
        self.roles.iter().any(|role| role.grants(permission))
    }

    /// Whether the holder may activate memberships
    pub fn can_activate(&self) -> bool {
        self.holds(Permission::CanActivateMembership)
    }

    /// Whether the holder may suspend memberships
    pub fn can_suspend(&self) -> bool {
        self.holds(Permission::CanSuspendMembership)
    }

    /// Whether the holder may revoke memberships
    pub fn can_revoke(&self) -> bool {
        self.holds(Permission::CanRevokeMembership)
    }

    /// Whether the holder may edit roles on membership records
    pub fn can_modify_permissions(&self) -> bool {
        self.holds(Permission::CanModifyPermissions)
    }

    /// Whether the holder has any administrative capability at all
    pub fn can_modify_membership(&self) -> bool {
        !self.permissions().is_empty()
    }

    /// Whether the record is awaiting admission
    pub fn is_pending(&self) -> bool {
        self.status == MembershipStatus::Pending
    }

    /// Whether the member may transact on the network
    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Active
    }

    /// Whether the membership is suspended
    pub fn is_suspended(&self) -> bool {
        self.status == MembershipStatus::Suspended
    }

    /// The record after activation
    ///
    /// Does not authorize the transition; the verification layer must have
    /// checked the acting party's [`can_activate`](Self::can_activate).
    pub fn activated(self) -> Self {
        self.with_status(MembershipStatus::Active)
    }

    /// The record after suspension; same authorization caveat as
    /// [`activated`](Self::activated)
    pub fn suspended(self) -> Self {
        self.with_status(MembershipStatus::Suspended)
    }

    /// The record with an edited role set
    ///
    /// Requires `CAN_MODIFY_PERMISSIONS` on the acting party, checked by
    /// the verification layer.
    pub fn with_roles(mut self, roles: BTreeSet<Role>) -> Self {
        self.roles = roles;
        self.touch();
        self
    }

    fn with_status(mut self, status: MembershipStatus) -> Self {
        self.status = status;
        self.touch();
        self
    }

    fn touch(&mut self) {
        self.modified = Utc::now().max(self.issued);
    }

    /// Project the record into a known query schema
    ///
    /// Unrecognized schemas fail explicitly rather than producing a
    /// degraded mapping.
    pub fn project(&self, schema: QuerySchema) -> Result<MembershipProjection> {
        match schema {
            QuerySchema::MembershipV1 => Ok(MembershipProjection {
                identity: self.identity.clone(),
                network_id: self.network_id.clone(),
                status: self.status,
            }),
            other => Err(MembershipError::UnsupportedSchema(other.to_string())),
        }
    }
}

/// Query schemas known to the surrounding persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuerySchema {
    /// Reduced membership view: identity, network id, status
    MembershipV1,
    /// Identity-graph schema owned by the directory subsystem; membership
    /// records do not map into it
    NetworkIdentityV1,
}

impl fmt::Display for QuerySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuerySchema::MembershipV1 => write!(f, "MembershipV1"),
            QuerySchema::NetworkIdentityV1 => write!(f, "NetworkIdentityV1"),
        }
    }
}

/// Reduced membership view for the persistence collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProjection {
    /// The owning party
    pub identity: String,
    /// Network this membership belongs to
    pub network_id: String,
    /// Current admission status
    pub status: MembershipStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> MembershipRecord {
        MembershipRecord::pending_request(
            "O=Alice,L=London",
            "net-1",
            vec!["O=Alice,L=London".into(), "O=Manager,L=London".into()],
        )
    }

    fn with_role(role: Role) -> MembershipRecord {
        pending().with_roles(BTreeSet::from([role]))
    }

    #[test]
    fn test_pending_request_defaults() {
        let record = pending();
        assert!(record.is_pending());
        assert!(!record.is_active());
        assert!(!record.is_suspended());
        assert_eq!(record.network_id(), "net-1");
        assert_eq!(record.roles().len(), 1);
        assert!(record.roles().contains(&Role::member()));
        assert_eq!(record.issued(), record.modified());
        assert_eq!(record.participants().len(), 2);
    }

    #[test]
    fn test_manager_role_grants_every_predicate() {
        let record = with_role(Role::network_manager());
        assert!(record.can_activate());
        assert!(record.can_suspend());
        assert!(record.can_revoke());
        assert!(record.can_modify_permissions());
        assert!(record.can_modify_membership());
    }

    #[test]
    fn test_plain_member_grants_nothing() {
        let record = pending();
        assert!(!record.can_activate());
        assert!(!record.can_suspend());
        assert!(!record.can_revoke());
        assert!(!record.can_modify_permissions());
        assert!(!record.can_modify_membership());
    }

    #[test]
    fn test_permissions_union_across_roles() {
        let activator = Role::new(
            "Activator",
            BTreeSet::from([Permission::CanActivateMembership]),
        );
        let suspender = Role::new(
            "Suspender",
            BTreeSet::from([Permission::CanSuspendMembership]),
        );
        let record = pending().with_roles(BTreeSet::from([activator, suspender]));

        assert_eq!(
            record.permissions(),
            BTreeSet::from([
                Permission::CanActivateMembership,
                Permission::CanSuspendMembership,
            ])
        );
        assert!(record.can_activate());
        assert!(record.can_suspend());
        assert!(!record.can_revoke());
        assert!(record.can_modify_membership());
    }

    #[test]
    fn test_can_modify_membership_iff_nonempty_union() {
        let empty_role = Role::new("Observer", BTreeSet::new());
        let record = pending().with_roles(BTreeSet::from([empty_role, Role::member()]));
        assert!(record.permissions().is_empty());
        assert!(!record.can_modify_membership());
    }

    #[test]
    fn test_transition_table() {
        use MembershipStatus::*;
        assert_eq!(
            MembershipStatus::transition_requirement(Pending, Active),
            Some(Permission::CanActivateMembership)
        );
        assert_eq!(
            MembershipStatus::transition_requirement(Active, Suspended),
            Some(Permission::CanSuspendMembership)
        );
        assert_eq!(
            MembershipStatus::transition_requirement(Suspended, Active),
            Some(Permission::CanActivateMembership)
        );

        // Every other pair is never directly authorized
        for from in [Pending, Active, Suspended] {
            for to in [Pending, Active, Suspended] {
                let listed = matches!(
                    (from, to),
                    (Pending, Active) | (Active, Suspended) | (Suspended, Active)
                );
                if !listed {
                    assert_eq!(
                        MembershipStatus::transition_requirement(from, to),
                        None,
                        "{from} -> {to} must not be authorized"
                    );
                }
            }
        }
    }

    #[test]
    fn test_revocation_requirement() {
        assert_eq!(
            MembershipStatus::revocation_requirement(),
            Permission::CanRevokeMembership
        );
    }

    #[test]
    fn test_status_changes_keep_identity_and_advance_modified() {
        let record = pending();
        let linear_id = record.linear_id();
        let issued = record.issued();

        let active = record.activated();
        assert!(active.is_active());
        assert_eq!(active.linear_id(), linear_id);
        assert_eq!(active.issued(), issued);
        assert!(active.modified() >= active.issued());

        let suspended = active.suspended();
        assert!(suspended.is_suspended());
        assert_eq!(suspended.linear_id(), linear_id);
        assert!(suspended.modified() >= suspended.issued());
    }

    #[test]
    fn test_role_edit_preserves_linear_id() {
        let record = pending();
        let linear_id = record.linear_id();
        let edited = record.with_roles(BTreeSet::from([Role::network_manager()]));
        assert_eq!(edited.linear_id(), linear_id);
        assert!(edited.can_modify_permissions());
    }

    #[test]
    fn test_projection_membership_schema() {
        let record = pending().activated();
        let projection = record.project(QuerySchema::MembershipV1).unwrap();
        assert_eq!(projection.identity, record.identity());
        assert_eq!(projection.network_id, "net-1");
        assert_eq!(projection.status, MembershipStatus::Active);
    }

    #[test]
    fn test_projection_unknown_schema_fails() {
        let record = pending();
        let err = record.project(QuerySchema::NetworkIdentityV1).unwrap_err();
        assert!(matches!(err, MembershipError::UnsupportedSchema(_)));
        assert!(err.to_string().contains("NetworkIdentityV1"));
    }

    #[test]
    fn test_status_wire_casing() {
        let json = serde_json::to_string(&MembershipStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
        let back: MembershipStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(back, MembershipStatus::Suspended);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = with_role(Role::network_manager()).activated();
        let json = serde_json::to_string(&record).unwrap();
        let back: MembershipRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
