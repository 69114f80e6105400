//! Keyed mutual exclusion
//!
//! A [`LockRegistry`] hands out one exclusive section per string key. Slots are
//! created on first use and reclaimed once nobody holds or waits on them.
//!
//! Reclamation is safe because slot references are only ever taken out of the
//! map while the owning shard is write-locked, and a slot is removed only when
//! the map holds the last reference to it. A waiter always holds a reference,
//! so a contended slot is never discarded.


use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

type Slot = Arc<Mutex<()>>;

/// Registry of lazily created per-key locks
#[derive(Debug, Clone)]
pub struct LockRegistry {
    name: &'static str,
    slots: Arc<DashMap<String, Slot>>,
}

impl LockRegistry {
    /// Create an empty registry; `name` only appears in traces
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: Arc::new(DashMap::new()),
        }
    }

    /// Wait for exclusive access to `key`
    ///
    /// Waiters are served in FIFO order. The section ends when the returned
    /// guard is dropped.
    pub async fn acquire(&self, key: impl Into<String>) -> KeyGuard {
        let key = key.into();
        let slot = Arc::clone(&*self.slots.entry(key.clone()).or_default());
        let lease = Lease {
            key,
            slots: Arc::clone(&self.slots),
        };

        trace!(registry = self.name, key = %lease.key, "acquiring keyed lock");
        let guard = slot.lock_owned().await;

        KeyGuard {
            _guard: guard,
            lease,
        }
    }

    /// Take the lock only if it is free right now
    pub fn try_acquire(&self, key: impl Into<String>) -> Option<KeyGuard> {
        let key = key.into();
        let slot = Arc::clone(&*self.slots.entry(key.clone()).or_default());
        let lease = Lease {
            key,
            slots: Arc::clone(&self.slots),
        };

        slot.try_lock_owned().ok().map(|guard| KeyGuard {
            _guard: guard,
            lease,
        })
    }

    /// Whether some caller currently holds `key`
    pub fn is_locked(&self, key: &str) -> bool {
        self.slots
            .get(key)
            .map(|slot| slot.try_lock().is_err())
            .unwrap_or(false)
    }

    /// Number of live slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Exclusive section for one key
///
/// Field order matters: the mutex guard must be released before the lease
/// tries to reclaim the slot.
#[must_use = "the lock is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct KeyGuard {
    _guard: OwnedMutexGuard<()>,
    lease: Lease,
}

impl KeyGuard {
    pub fn key(&self) -> &str {
        &self.lease.key
    }
}

/// Interest in a slot; the last lease to go away removes it from the map.
///
/// A lease dropped while a cancelled acquisition still holds the slot leaves
/// the entry for the next holder to reclaim.
#[derive(Debug)]
struct Lease {
    key: String,
    slots: Arc<DashMap<String, Slot>>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}
