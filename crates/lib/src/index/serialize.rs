//! Exportable views of index entries.
//!
//! Entries are exported one blob per namespace (the leading segment of the
//! key, usually the adapter). A blob is a JSON array of `[key, paths]` pairs,
//! each path rendered as its list of segments. Key order and path order are
//! preserved.

use futures::TryStreamExt;
use indexmap::IndexMap;

use super::PathHint;
use crate::Result;
use crate::backend::{PathIndexStore, StoreError};
use crate::constants::NAMESPACE_SEPARATOR;
use crate::element::Path;

/// The leading segment of an index key.
pub fn namespace_of(key: &str) -> &str {
    key.split(NAMESPACE_SEPARATOR).next().unwrap_or(key)
}

/// Groups entries by the namespace of their key, keeping first-seen order.
pub fn entries_by_namespace(
    entries: impl IntoIterator<Item = PathHint>,
) -> IndexMap<String, Vec<PathHint>> {
    let mut grouped: IndexMap<String, Vec<PathHint>> = IndexMap::new();
    for entry in entries {
        grouped
            .entry(namespace_of(&entry.key).to_string())
            .or_default()
            .push(entry);
    }
    grouped
}

/// Encodes entries as a JSON array of `[key, paths]` pairs.
pub fn serialize_entries(entries: &[PathHint]) -> Result<String> {
    let pairs: Vec<(&str, &[Path])> = entries
        .iter()
        .map(|entry| (entry.key.as_str(), entry.value.as_slice()))
        .collect();
    Ok(serde_json::to_string(&pairs)?)
}

/// Decodes blobs produced by [`serialize_entries`], concatenating them in order.
pub fn deserialize_entries<S: AsRef<str>>(blobs: &[S]) -> Result<Vec<PathHint>> {
    let mut entries = Vec::new();
    for blob in blobs {
        let pairs: Vec<(String, Vec<Path>)> = serde_json::from_str(blob.as_ref())?;
        entries.extend(pairs.into_iter().map(|(key, value)| PathHint::new(key, value)));
    }
    Ok(entries)
}

/// Encodes entries as one blob per namespace.
pub fn serialize_by_namespace(
    entries: impl IntoIterator<Item = PathHint>,
) -> Result<IndexMap<String, String>> {
    entries_by_namespace(entries)
        .into_iter()
        .map(|(namespace, entries)| -> Result<(String, String)> {
            Ok((namespace, serialize_entries(&entries)?))
        })
        .collect()
}

/// Reads every entry of `store`, ordered by key.
pub async fn read_all_entries<S>(store: &S) -> Result<Vec<PathHint>>
where
    S: PathIndexStore + ?Sized,
{
    let mut keys: Vec<String> = store.keys().try_collect().await?;
    keys.sort();

    let mut entries = Vec::with_capacity(keys.len());
    for key in keys {
        // A key can vanish between enumeration and read only if someone
        // writes concurrently, which the single-writer contract forbids.
        let value = store
            .get(&key)
            .await?
            .ok_or_else(|| StoreError::CorruptEntry {
                key: key.clone(),
                reason: "listed key has no value".to_string(),
            })?;
        entries.push(PathHint::new(key, value));
    }
    Ok(entries)
}
