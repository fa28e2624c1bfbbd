//! Store implementations for the path index
//!
//! This module provides the core [`PathIndexStore`] trait and an in-memory
//! implementation.
//!
//! The `PathIndexStore` trait defines the interface for persisting index
//! records: an asynchronous ordered mapping from an id's full name to the
//! ordered list of [`Path`]s that contributed to it. This allows the index
//! logic (hint computation, updates, lookups) to be independent of the
//! specific storage mechanism.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::Result;
use crate::element::Path;
use crate::index::PathHint;

mod errors;
mod in_memory;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;

/// A lazy stream of stored keys.
///
/// Each call to [`PathIndexStore::keys`] starts a fresh enumeration. Dropping
/// the stream abandons it.
pub type KeyStream<'a> = BoxStream<'a, Result<String>>;

/// Store trait abstracting where path index records live.
///
/// Implementations handle how records are persisted (in memory, on disk, in a
/// remote service). They make no coordination guarantees of their own: the
/// index functions assume a single writer per store, which callers enforce
/// with an [`IndexLock`](crate::index::IndexLock).
///
/// Every failure is returned to the caller. The index performs no retries and
/// no rollback, so a store that needs durability or atomicity must provide it
/// itself.
///
/// All store implementations must be `Send` and `Sync` to allow sharing
/// across tasks.
#[async_trait]
pub trait PathIndexStore: Send + Sync {
    /// Retrieves the paths recorded for `key`.
    ///
    /// # Returns
    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<Path>>>;

    /// Stores every entry, overwriting existing keys.
    async fn set_all(&self, entries: Vec<PathHint>) -> Result<()>;

    /// Removes every listed key. Absent keys are ignored.
    async fn delete_all(&self, keys: Vec<String>) -> Result<()>;

    /// Removes every entry.
    async fn clear(&self) -> Result<()>;

    /// Enumerates the stored keys.
    ///
    /// The sequence is finite and restartable per call. No ordering is
    /// guaranteed across keys.
    fn keys(&self) -> KeyStream<'_>;

    /// Stores a single entry (convenience wrapper around `set_all`).
    async fn set(&self, key: &str, value: Vec<Path>) -> Result<()> {
        self.set_all(vec![PathHint::new(key, value)]).await
    }
}
