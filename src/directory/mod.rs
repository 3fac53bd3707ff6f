//! Membership directory
//!
//! Concurrent map from identity-key fingerprints to live identity records.
//! An external synchronization layer pushes upserts and removals in; lookup
//! consumers resolve counterparties by fingerprint. The directory is a pure
//! projection of what the synchronization layer has delivered so far: it
//! performs no I/O and trusts its inputs.
//!
//! Exposes a one-shot readiness signal that resolves the first time the
//! directory satisfies a caller-supplied policy (by default: the designated
//! network manager's record is present).

mod ready;
mod store;
mod types;

pub use ready::ReadySignal;
pub use store::{MembershipDirectory, ReadyPolicy};
pub use types::{IdentityRecord, KeyFingerprint, LegacyNodeIdentity, MemberIdentity};
