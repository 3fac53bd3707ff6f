//! Membership directory store
//!
//! Thread-safe cache of live identity records indexed by key fingerprint.
//! Fed by the synchronization layer through `add_or_update`; read by
//! request-handling paths through `lookup_by_key_hash`.

use dashmap::DashMap;
use tracing::{debug, info};

use super::ready::ReadySignal;
use super::types::{IdentityRecord, KeyFingerprint, LegacyNodeIdentity, MemberIdentity};
use crate::types::Result;

/// Policy deciding when the directory is ready to serve
///
/// Evaluated after every upsert until it first returns true.
pub type ReadyPolicy<R> = Box<dyn Fn(&MembershipDirectory<R>) -> bool + Send + Sync>;

/// Concurrent directory of identity records, keyed by key fingerprint
///
/// At most one entry per fingerprint; an upsert replaces the prior value
/// for that fingerprint entirely. Single-entry operations are linearizable
/// per key. The designated network manager's record is injected at
/// construction and never changes.
pub struct MembershipDirectory<R: IdentityRecord> {
    /// Live records: fingerprint -> record
    entries: DashMap<KeyFingerprint, R>,
    /// The network's designated manager identity
    manager: R,
    /// One-shot bootstrap signal
    ready: ReadySignal,
    /// When the directory counts as bootstrapped
    ready_policy: ReadyPolicy<R>,
}

impl<R: IdentityRecord> MembershipDirectory<R> {
    /// Create a directory that is ready once the manager's record arrives
    pub fn new(manager: R) -> Self {
        let manager_fp = manager.key_fingerprint();
        Self::with_ready_policy(
            manager,
            Box::new(move |dir| dir.contains(&manager_fp)),
        )
    }

    /// Create a directory with a caller-supplied readiness policy
    pub fn with_ready_policy(manager: R, ready_policy: ReadyPolicy<R>) -> Self {
        Self {
            entries: DashMap::new(),
            manager,
            ready: ReadySignal::new(),
            ready_policy,
        }
    }

    /// Upsert one identity record, keyed by its derived fingerprint
    ///
    /// Replaces any prior record for the same fingerprint; re-submitting
    /// an identical record is observationally a no-op.
    pub fn add_or_update(&self, record: R) {
        let fp = record.key_fingerprint();
        let replaced = self.entries.insert(fp.clone(), record).is_some();
        debug!(
            "Directory upsert: {} (replaced={}, count={})",
            fp,
            replaced,
            self.entries.len()
        );
        self.check_ready();
    }

    /// Upsert a batch of records, each applied independently in input order
    ///
    /// No cross-entry atomicity: concurrent readers may observe the batch
    /// partially applied.
    pub fn add_or_update_many(&self, records: impl IntoIterator<Item = R>) {
        for record in records {
            self.add_or_update(record);
        }
    }

    /// Remove the entry for this record's fingerprint
    ///
    /// Removing an absent fingerprint is a no-op.
    pub fn remove(&self, record: &R) {
        self.remove_by_key_hash(&record.key_fingerprint());
    }

    /// Remove the entry for a fingerprint, returning it if present
    pub fn remove_by_key_hash(&self, fingerprint: &KeyFingerprint) -> Option<R> {
        let removed = self.entries.remove(fingerprint).map(|(_, record)| record);
        if removed.is_some() {
            debug!(
                "Directory removal: {} (count={})",
                fingerprint,
                self.entries.len()
            );
        }
        removed
    }

    /// Current record for a fingerprint, or `None` if absent
    pub fn lookup_by_key_hash(&self, fingerprint: &KeyFingerprint) -> Option<R> {
        self.entries.get(fingerprint).map(|entry| entry.value().clone())
    }

    /// Whether an entry exists for a fingerprint
    pub fn contains(&self, fingerprint: &KeyFingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    /// Empty the directory for a full resynchronization
    ///
    /// Does not reset the readiness signal: once bootstrapped, a node
    /// stays bootstrapped while it resyncs.
    pub fn clear(&self) {
        let count = self.entries.len();
        self.entries.clear();
        info!("Directory cleared for resync ({} entries dropped)", count);
    }

    /// The network's designated manager identity
    pub fn manager_info(&self) -> &R {
        &self.manager
    }

    /// The directory's one-shot readiness signal
    pub fn ready(&self) -> &ReadySignal {
        &self.ready
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_ready(&self) {
        if !self.ready.is_ready() && (self.ready_policy)(self) {
            info!("Membership directory bootstrapped, ready to serve");
            self.ready.resolve();
        }
    }
}

impl MembershipDirectory<MemberIdentity> {
    /// Upsert a node published in the legacy identity shape
    ///
    /// Converts to the canonical record (plain member role, `PENDING`
    /// status) and delegates to [`add_or_update`](Self::add_or_update).
    pub fn add_legacy_node(&self, legacy: &LegacyNodeIdentity) -> Result<()> {
        let record = MemberIdentity::from_legacy(legacy)?;
        self.add_or_update(record);
        Ok(())
    }
}
