//! In-memory path index store
//!
//! This module provides an in-memory implementation of the [`PathIndexStore`]
//! trait, suitable for testing, development, or embedding in a process whose
//! index does not need to outlive it.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::{StreamExt, stream};
use tokio::sync::RwLock;

use super::{KeyStream, PathIndexStore};
use crate::Result;
use crate::element::Path;
use crate::index::PathHint;

/// A simple in-memory store using an ordered map.
///
/// Keys enumerate in lexical order, although callers must not rely on it.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Entries with read-write lock for concurrent access
    entries: RwLock<BTreeMap<String, Vec<Path>>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    pub fn from_entries(entries: impl IntoIterator<Item = PathHint>) -> Self {
        let entries = entries
            .into_iter()
            .map(|hint| (hint.key, hint.value))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// A copy of every stored entry, ordered by key.
    pub async fn snapshot(&self) -> BTreeMap<String, Vec<Path>> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl PathIndexStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<Path>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_all(&self, entries: Vec<PathHint>) -> Result<()> {
        let mut stored = self.entries.write().await;
        for hint in entries {
            stored.insert(hint.key, hint.value);
        }
        Ok(())
    }

    async fn delete_all(&self, keys: Vec<String>) -> Result<()> {
        let mut stored = self.entries.write().await;
        for key in keys {
            stored.remove(&key);
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }

    fn keys(&self) -> KeyStream<'_> {
        // Snapshot on first poll so the lock is not held while the caller iterates
        stream::once(async move {
            self.entries
                .read()
                .await
                .keys()
                .cloned()
                .collect::<Vec<_>>()
        })
        .flat_map(|keys| stream::iter(keys.into_iter().map(Ok)))
        .boxed()
    }
}
