//! External exclusion for index updates.
//!
//! The index functions never lock anything themselves. A workspace that owns
//! a store also owns an [`IndexLock`] for it and holds it around the whole
//! merge, index, split cycle. Update functions take an [`IndexWriteGuard`] to
//! make that obligation visible in their signature.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Single-writer, many-reader lock guarding one path index store.
#[derive(Debug, Default)]
pub struct IndexLock {
    inner: RwLock<()>,
}

/// Proof that the holder is the only writer of the guarded store.
#[derive(Debug)]
pub struct IndexWriteGuard<'a> {
    _guard: RwLockWriteGuard<'a, ()>,
}

/// Proof that no writer is active on the guarded store.
#[derive(Debug)]
pub struct IndexReadGuard<'a> {
    _guard: RwLockReadGuard<'a, ()>,
}

impl IndexLock {
    /// Creates an unlocked lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access.
    pub async fn write(&self) -> IndexWriteGuard<'_> {
        IndexWriteGuard {
            _guard: self.inner.write().await,
        }
    }

    /// Waits until no writer holds the lock.
    pub async fn read(&self) -> IndexReadGuard<'_> {
        IndexReadGuard {
            _guard: self.inner.read().await,
        }
    }

    /// Takes exclusive access if nobody else holds the lock.
    pub fn try_write(&self) -> Option<IndexWriteGuard<'_>> {
        self.inner
            .try_write()
            .ok()
            .map(|guard| IndexWriteGuard { _guard: guard })
    }
}
