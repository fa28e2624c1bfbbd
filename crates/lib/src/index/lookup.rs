//! Path lookup with ancestor fallback.

use tracing::trace;

use crate::Result;
use crate::backend::PathIndexStore;
use crate::constants::NAMESPACE_SEPARATOR;
use crate::element::{ElemId, Path};

/// Outcome of looking up an id in the index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Owning paths. Empty when nothing up to the top-level element is indexed.
    pub paths: Vec<Path>,
    /// Whether the id itself was indexed, as opposed to one of its ancestors.
    pub exact: bool,
}

impl Resolution {
    /// Whether `path` is among the owning paths.
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}

/// Looks up `id`, walking up its ancestors until an indexed key is found.
///
/// An exact hit yields every recorded path. A hit on an ancestor yields only
/// its first path, so that a value nobody indexed individually gets a single
/// owner instead of being duplicated into every fragment. The walk never
/// goes above the id's top-level element.
pub async fn resolve<S>(id: &ElemId, store: &S) -> Result<Resolution>
where
    S: PathIndexStore + ?Sized,
{
    let parts = id.full_name_parts();
    let top_level_len = id.top_level_parent().full_name_parts().len();

    let mut len = parts.len();
    while len > 0 {
        let key = parts[..len].join(NAMESPACE_SEPARATOR);
        if let Some(mut paths) = store.get(&key).await?.filter(|paths| !paths.is_empty()) {
            let exact = len == parts.len();
            if !exact {
                paths.truncate(1);
            }
            trace!(id = %id, key = %key, exact, "Resolved path hint");
            return Ok(Resolution { paths, exact });
        }
        if len <= top_level_len {
            break;
        }
        len -= 1;
    }

    trace!(id = %id, "No path hint found");
    Ok(Resolution::default())
}

/// Returns the paths owning `id`. See [`resolve`].
pub async fn resolve_paths<S>(id: &ElemId, store: &S) -> Result<Vec<Path>>
where
    S: PathIndexStore + ?Sized,
{
    Ok(resolve(id, store).await?.paths)
}
