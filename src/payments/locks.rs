use dashmap::DashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::models::CartId;

type LockTable<K> = Arc<DashMap<K, Arc<Mutex<()>>>>;

/// One async mutex per key that currently has a write in flight. Keyed by
/// cart for selections and by customer for cart creation.
///
/// Entries are dropped again once nobody holds or waits on them, so the
/// table only ever grows with the number of keys being written concurrently.
#[derive(Debug, Clone)]
pub(crate) struct CartLocks<K = CartId>(LockTable<K>)
where
    K: Eq + Hash;

pub(crate) struct CartLockGuard<K = CartId>
where
    K: Eq + Hash,
{
    key: K,
    guard: Option<OwnedMutexGuard<()>>,
    locks: LockTable<K>,
}

impl<K> CartLocks<K>
where
    K: Eq + Hash + Copy + Debug,
{
    pub(crate) fn new() -> Self {
        Self(Arc::new(DashMap::new()))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn lock(&self, key: K) -> CartLockGuard<K> {
        let mutex = Arc::clone(
            self.0
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let guard = mutex.lock_owned().await;
        CartLockGuard {
            key,
            guard: Some(guard),
            locks: Arc::clone(&self.0),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K> Drop for CartLockGuard<K>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        // Release first so the strong count only includes the table and waiters
        drop(self.guard.take());
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
