//! Named mutual-exclusion locks with timed auto-release.
//!
//! A lock is identified by an application-chosen string key (the panel
//! manager uses [`crate::panel::TRANSITION_LOCK`]) and expires on its own
//! after the duration given at acquisition. Expiry is lazy: an entry whose
//! deadline has passed counts as released and is replaced by the next
//! successful `lock` for the same key.

use std::collections::HashMap;

use tracing::debug;

/// One currently-held critical section.
#[derive(Debug, Clone, Copy)]
struct LockEntry {
    expires_at_ms: u64,
}

impl LockEntry {
    fn is_live(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Mutual-exclusion lock table with per-key auto-expiry.
///
/// At most one live entry exists per key. A `lock` call against a held key
/// fails fast and never re-arms the existing entry, so repeated calls cannot
/// extend a critical section indefinitely.
#[derive(Debug, Default)]
pub struct CriticalSectionManager {
    locks: HashMap<String, LockEntry>,
}

impl CriticalSectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire `key` for `duration_ms`. Returns `true` and arms the
    /// auto-release deadline iff no live lock for `key` exists. Returns
    /// `false` with zero side effects when `key` is already held.
    pub fn lock(&mut self, key: &str, duration_ms: u64, now_ms: u64) -> bool {
        if self.is_locked(key, now_ms) {
            return false;
        }
        self.locks.insert(
            key.to_string(),
            LockEntry {
                expires_at_ms: now_ms + duration_ms,
            },
        );
        debug!(key, duration_ms, "critical section acquired");
        true
    }

    /// Whether a live lock exists for `key`. Pure read.
    pub fn is_locked(&self, key: &str, now_ms: u64) -> bool {
        self.locks
            .get(key)
            .map(|entry| entry.is_live(now_ms))
            .unwrap_or(false)
    }

    /// Remove the lock for `key` immediately, regardless of remaining
    /// duration. No-op when `key` is not held.
    pub fn release(&mut self, key: &str) {
        if self.locks.remove(key).is_some() {
            debug!(key, "critical section released");
        }
    }

    /// Number of live locks. Diagnostic read.
    pub fn active_lock_count(&self, now_ms: u64) -> usize {
        self.locks
            .values()
            .filter(|entry| entry.is_live(now_ms))
            .count()
    }
}
