//! One-shot readiness signal
//!
//! Single-assignment gate for directory bootstrap: resolves exactly once,
//! stays resolved for the rest of the directory's lifetime, and wakes every
//! task parked on `wait`. Callers own their own timeout policy.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tracing::debug;

/// Resolve-once readiness gate
#[derive(Debug, Default)]
pub struct ReadySignal {
    resolved: AtomicBool,
    notify: Notify,
}

impl ReadySignal {
    /// Create an unresolved signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the signal has resolved
    pub fn is_ready(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }

    /// Resolve the signal and wake all waiters
    ///
    /// Only the first call has any effect. Writes made before `resolve`
    /// are visible to tasks woken from `wait`.
    pub fn resolve(&self) {
        if !self.resolved.swap(true, Ordering::AcqRel) {
            debug!("Readiness signal resolved");
            self.notify.notify_waiters();
        }
    }

    /// Wait until the signal resolves
    ///
    /// Returns immediately if already resolved.
    pub async fn wait(&self) {
        loop {
            // Register before checking the flag so a concurrent resolve
            // between the check and the await cannot be missed.
            let notified = self.notify.notified();
            if self.is_ready() {
                return;
            }
            notified.await;
        }
    }
}
