//! Membership core for permissioned multi-party networks
//!
//! Provides the membership directory and lifecycle model that a node on a
//! permissioned network builds its admission decisions on:
//!
//! - **Directory**: concurrent, in-memory map from identity-key fingerprints
//!   to live identity records, fed by an external synchronization layer,
//!   with a one-shot readiness signal for startup gating
//! - **Membership**: the member lifecycle record (pending/active/suspended),
//!   role-derived administrative permissions, and the pure predicates a
//!   transaction-verification layer consults before allowing a transition
//!
//! This crate performs no I/O and defines no transport. Gossip, transaction
//! construction, and persistence are external collaborators that compose the
//! pieces exported here.

pub mod directory;
pub mod membership;
pub mod types;

pub use directory::{
    IdentityRecord, KeyFingerprint, LegacyNodeIdentity, MemberIdentity, MembershipDirectory,
    ReadySignal,
};
pub use membership::{
    MembershipProjection, MembershipRecord, MembershipStatus, Permission, QuerySchema, Role,
};
pub use types::{MembershipError, Result};
