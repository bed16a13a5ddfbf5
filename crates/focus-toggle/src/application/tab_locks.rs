//! Per-tab in-flight locks.
//!
//! Every store read, style call, and store write is a suspension point.  If
//! two triggers on the same tab were allowed to interleave, both could read
//! `OFF`, both apply the style, and both write `ON`: a missed update that
//! leaves a duplicated style sheet behind.  Holding one async mutex per tab
//! across the whole read → style → write sequence rules that out, while
//! triggers on different tabs never wait on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use focus_core::TabId;
use tokio::sync::OwnedMutexGuard;

type TabLock = Arc<tokio::sync::Mutex<()>>;

/// Registry of one async mutex per tab.
///
/// The outer `std::sync::Mutex` only guards the map and is never held across
/// an `.await`.
#[derive(Default)]
pub struct TabLocks {
    locks: Mutex<HashMap<TabId, TabLock>>,
}

impl TabLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other caller holds `tab`'s lock, then returns a guard.
    ///
    /// Waiters are served in FIFO order (tokio's mutex is fair).
    pub async fn acquire(&self, tab: TabId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(tab).or_default())
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry of a closed tab, then releases `guard`.
    ///
    /// The entry is removed while `guard` is still held, and only when no
    /// other caller has queued on the same mutex.  Queued callers keep the
    /// entry alive, so a later `acquire` still waits behind them instead of
    /// getting a fresh mutex.
    ///
    /// Returns `true` if the entry was removed.
    pub fn retire(&self, tab: TabId, guard: OwnedMutexGuard<()>) -> bool {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let held = OwnedMutexGuard::mutex(&guard);
        let removable = match locks.get(&tab) {
            // One reference in the map, one in the guard: nobody is waiting.
            Some(entry) => Arc::ptr_eq(entry, held) && Arc::strong_count(entry) == 2,
            None => false,
        };
        if removable {
            locks.remove(&tab);
        }
        drop(guard);
        removable
    }

    /// Number of tabs with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` when no tab has a lock entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
