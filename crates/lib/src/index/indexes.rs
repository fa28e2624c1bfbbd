//! The recursive and top-level indexes of one workspace.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::info;

use super::lock::IndexLock;
use super::serialize::{read_all_entries, serialize_by_namespace};
use super::update::{update_path_index, update_top_level_path_index};
use super::{lookup, split};
use crate::Result;
use crate::backend::{InMemoryStore, PathIndexStore};
use crate::config::IndexConfig;
use crate::element::{ElemId, Element, Path};

/// Both index granularities, maintained together behind one lock.
///
/// The recursive index answers lookups down to nested values and drives
/// [`split_element`](Self::split_element). The top-level index only records
/// which paths hold each top-level element. A disabled index is never
/// written, so queries against it find nothing.
#[derive(Clone)]
pub struct PathIndexes {
    paths: Arc<dyn PathIndexStore>,
    top_level: Arc<dyn PathIndexStore>,
    config: IndexConfig,
    lock: Arc<IndexLock>,
}

impl std::fmt::Debug for PathIndexes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathIndexes")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PathIndexes {
    /// Wraps two stores. Fails if `config` is invalid.
    pub fn new(
        paths: Arc<dyn PathIndexStore>,
        top_level: Arc<dyn PathIndexStore>,
        config: IndexConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            paths,
            top_level,
            config,
            lock: Arc::new(IndexLock::new()),
        })
    }

    /// Indexes backed by fresh [`InMemoryStore`]s.
    pub fn in_memory(config: IndexConfig) -> Result<Self> {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            config,
        )
    }

    /// The configuration these indexes were built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The lock shared by both stores.
    pub fn lock(&self) -> &Arc<IndexLock> {
        &self.lock
    }

    /// The recursive index store.
    pub fn paths_store(&self) -> &Arc<dyn PathIndexStore> {
        &self.paths
    }

    /// The top-level index store.
    pub fn top_level_store(&self) -> &Arc<dyn PathIndexStore> {
        &self.top_level
    }

    /// Updates every enabled index with `changed`.
    ///
    /// See [`update_index`](super::update_index) for the meaning of
    /// `known_ids`. Holds the write lock for the whole call.
    pub async fn update(
        &self,
        changed: &[Element],
        known_ids: Option<&HashSet<ElemId>>,
    ) -> Result<()> {
        let guard = self.lock.write().await;
        if self.config.track_paths {
            update_path_index(self.paths.as_ref(), &guard, changed, known_ids).await?;
        }
        if self.config.track_top_level {
            update_top_level_path_index(self.top_level.as_ref(), &guard, changed, known_ids)
                .await?;
        }
        info!(
            changed = changed.len(),
            incremental = known_ids.is_some(),
            "Path indexes updated"
        );
        Ok(())
    }

    /// Paths owning `id` in the recursive index, with ancestor fallback.
    pub async fn resolve_paths(&self, id: &ElemId) -> Result<Vec<Path>> {
        let _guard = self.lock.read().await;
        lookup::resolve_paths(id, self.paths.as_ref()).await
    }

    /// Paths holding the top-level element of `id`.
    pub async fn top_level_paths(&self, id: &ElemId) -> Result<Vec<Path>> {
        let _guard = self.lock.read().await;
        let key = id.top_level_parent().full_name();
        Ok(self.top_level.get(&key).await?.unwrap_or_default())
    }

    /// Splits a merged element into per-path fragments.
    pub async fn split_element(&self, element: &Element) -> Result<Vec<Element>> {
        let _guard = self.lock.read().await;
        split::split_element(element, self.paths.as_ref()).await
    }

    /// The recursive index as one JSON blob per namespace.
    pub async fn export_by_namespace(&self) -> Result<IndexMap<String, String>> {
        let _guard = self.lock.read().await;
        serialize_by_namespace(read_all_entries(self.paths.as_ref()).await?)
    }
}
