//! Directory identity types
//!
//! Fingerprint derivation and the identity-record shapes the directory
//! stores. The directory itself treats records as opaque values keyed by
//! their fingerprint; `MemberIdentity` is the canonical record shape used
//! on this network, `LegacyNodeIdentity` the pre-membership shape still
//! emitted by older nodes.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;

use crate::membership::{MembershipStatus, Role};
use crate::types::{MembershipError, Result};

/// Ed25519 public key length
pub const IDENTITY_KEY_LEN: usize = 32;

/// Stable fingerprint of a party's public identity key
///
/// Hex-encoded SHA-256 of the raw key bytes. Used as the directory's
/// lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyFingerprint(String);

impl KeyFingerprint {
    /// Derive the fingerprint for the given public key bytes
    pub fn derive(key_bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key_bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// The fingerprint as a hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are enough to identify an entry in logs
        write!(f, "{}", &self.0[..16.min(self.0.len())])
    }
}

/// A value the directory can store: anything keyed by a derived fingerprint
///
/// The directory never inspects a record beyond this key.
pub trait IdentityRecord: Clone + Send + Sync + 'static {
    /// Fingerprint of the record's public identity key
    fn key_fingerprint(&self) -> KeyFingerprint;
}

/// Canonical identity record for a network participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberIdentity {
    /// Display name of the owning party
    party: String,
    /// Raw ed25519 public identity key
    identity_key: [u8; IDENTITY_KEY_LEN],
    /// Roles held by this member
    roles: BTreeSet<Role>,
    /// Current admission status
    status: MembershipStatus,
}

impl MemberIdentity {
    /// Create an identity record from a verified public key
    ///
    /// Starts with the plain member role and `PENDING` status; use the
    /// builder methods to override.
    pub fn new(party: impl Into<String>, key: &VerifyingKey) -> Self {
        Self {
            party: party.into(),
            identity_key: key.to_bytes(),
            roles: BTreeSet::from([Role::member()]),
            status: MembershipStatus::Pending,
        }
    }

    /// Create an identity record from raw key bytes, validating the key
    pub fn from_key_bytes(party: impl Into<String>, key_bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; IDENTITY_KEY_LEN] = key_bytes.try_into().map_err(|_| {
            MembershipError::MalformedIdentityKey(format!(
                "expected {} bytes, got {}",
                IDENTITY_KEY_LEN,
                key_bytes.len()
            ))
        })?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| MembershipError::MalformedIdentityKey(e.to_string()))?;
        Ok(Self::new(party, &key))
    }

    /// Convert a legacy node identity into the canonical record shape
    ///
    /// Legacy nodes carry no roles or status, so the conversion assigns
    /// the plain member role and `PENDING` status. Kept for compatibility
    /// with older synchronization peers; intentionally not extended.
    pub fn from_legacy(legacy: &LegacyNodeIdentity) -> Result<Self> {
        Self::from_key_bytes(legacy.party.clone(), &legacy.identity_key)
    }

    /// Replace the role set
    pub fn with_roles(mut self, roles: BTreeSet<Role>) -> Self {
        self.roles = roles;
        self
    }

    /// Replace the admission status
    pub fn with_status(mut self, status: MembershipStatus) -> Self {
        self.status = status;
        self
    }

    /// Display name of the owning party
    pub fn party(&self) -> &str {
        &self.party
    }

    /// Raw public identity key bytes
    pub fn identity_key(&self) -> &[u8; IDENTITY_KEY_LEN] {
        &self.identity_key
    }

    /// Roles held by this member
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Current admission status
    pub fn status(&self) -> MembershipStatus {
        self.status
    }
}

impl IdentityRecord for MemberIdentity {
    fn key_fingerprint(&self) -> KeyFingerprint {
        KeyFingerprint::derive(&self.identity_key)
    }
}

/// Identity shape published by pre-membership nodes
///
/// Carries only the party name and raw key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyNodeIdentity {
    /// Display name of the owning party
    pub party: String,
    /// Raw public identity key bytes (unvalidated)
    pub identity_key: Vec<u8>,
}
