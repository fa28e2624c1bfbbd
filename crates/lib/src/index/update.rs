//! Incremental and full index updates.
//!
//! Both index granularities are maintained the same way, differing only in
//! the hint function:
//!
//! - [`update_path_index`] indexes every addressable location
//!   ([`hints_for_all_elements`])
//! - [`update_top_level_path_index`] indexes top-level ids only
//!   ([`top_level_hints_only`])

use std::collections::HashSet;

use futures::TryStreamExt;
use tracing::{debug, warn};

use super::hints::{hints_for_all_elements, top_level_hints_only};
use super::{IndexWriteGuard, PathHint};
use crate::Result;
use crate::backend::PathIndexStore;
use crate::element::{ElemId, Element};

/// Whether `id` is `scope` itself or nested below it.
///
/// Instances of a type are not nested below the type.
fn is_within(id: &ElemId, scope: &ElemId) -> bool {
    id.top_level_parent() == scope.top_level_parent()
        && id.full_name_parts().starts_with(&scope.full_name_parts())
}

/// Writes the hints of `changed` into `store`.
///
/// Without `known_ids` the store is rebuilt: cleared, then filled with the
/// hints of `changed`. With `known_ids`, the complete set of top-level ids
/// that are still live, the update is incremental:
///
/// 1. every key owned by an id outside `known_ids` is deleted;
/// 2. every key at or under the id of an element in `changed` is deleted,
///    so locations that disappeared from a changed element do not linger.
///    A changed field only clears its own keys, not those of its type;
/// 3. the hints of `changed` owned by a known id are written.
///
/// Keys that do not parse as ids cannot belong to a live element and are
/// deleted as well. An empty `changed` makes this a pure pruning pass.
/// Running the same update twice leaves the store as running it once.
///
/// Store failures abort the update and are returned as-is; whatever was
/// already written stays written.
pub async fn update_index<S, F>(
    store: &S,
    _guard: &IndexWriteGuard<'_>,
    changed: &[Element],
    known_ids: Option<&HashSet<ElemId>>,
    hint_fn: F,
) -> Result<()>
where
    S: PathIndexStore + ?Sized,
    F: Fn(&[Element]) -> Vec<PathHint>,
{
    let hints = hint_fn(changed);

    let Some(known_ids) = known_ids else {
        debug!(entries = hints.len(), "Rebuilding path index");
        store.clear().await?;
        if !hints.is_empty() {
            store.set_all(hints).await?;
        }
        return Ok(());
    };

    let changed_ids: HashSet<&ElemId> = changed
        .iter()
        .filter(|element| element.path().is_some())
        .map(Element::elem_id)
        .collect();

    let mut stale = Vec::new();
    let mut keys = store.keys();
    while let Some(key) = keys.try_next().await? {
        match ElemId::from_full_name(&key) {
            Ok(id) => {
                let owner = id.top_level_parent();
                if !known_ids.contains(&owner)
                    || changed_ids.iter().any(|changed| is_within(&id, changed))
                {
                    stale.push(key);
                }
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Dropping malformed path index key");
                stale.push(key);
            }
        }
    }
    drop(keys);

    let live: Vec<PathHint> = hints
        .into_iter()
        .filter(|hint| hint.owner().is_some_and(|owner| known_ids.contains(&owner)))
        .collect();

    debug!(
        deleted = stale.len(),
        written = live.len(),
        changed = changed_ids.len(),
        "Updating path index"
    );
    if !stale.is_empty() {
        store.delete_all(stale).await?;
    }
    if !live.is_empty() {
        store.set_all(live).await?;
    }
    Ok(())
}

/// [`update_index`] with the recursive hints of [`hints_for_all_elements`].
pub async fn update_path_index<S>(
    store: &S,
    guard: &IndexWriteGuard<'_>,
    changed: &[Element],
    known_ids: Option<&HashSet<ElemId>>,
) -> Result<()>
where
    S: PathIndexStore + ?Sized,
{
    update_index(store, guard, changed, known_ids, hints_for_all_elements).await
}

/// [`update_index`] with the coarse hints of [`top_level_hints_only`].
pub async fn update_top_level_path_index<S>(
    store: &S,
    guard: &IndexWriteGuard<'_>,
    changed: &[Element],
    known_ids: Option<&HashSet<ElemId>>,
) -> Result<()>
where
    S: PathIndexStore + ?Sized,
{
    update_index(store, guard, changed, known_ids, top_level_hints_only).await
}
