//! The path-provenance index.
//!
//! Elements are merged from fragments spread over many source files. The
//! index remembers, down to arbitrary nesting depth, which fragment paths
//! contributed each addressable part of an element, and uses that memory to
//! split a merged element back into per-path fragments.
//!
//! ## Components
//!
//! * **Hint computer ([`hints`])**: pure functions turning unmerged fragments
//!   into [`PathHint`] records.
//! * **Updater ([`update`])**: writes hints into a
//!   [`PathIndexStore`](crate::backend::PathIndexStore), either as a full
//!   rebuild or incrementally with pruning.
//! * **Lookup ([`lookup`]) and splitter ([`split`])**: answer which paths own
//!   an id, falling back to ancestors, and partition merged elements.
//! * **Serialization view ([`serialize`])**: groups entries per namespace for
//!   export.
//! * **[`PathIndexes`]**: maintains the recursive and top-level indexes side
//!   by side behind one [`IndexLock`].

use serde::{Deserialize, Serialize};

use crate::element::{ElemId, Path};

pub mod hints;
pub mod indexes;
pub mod lock;
pub mod lookup;
pub mod serialize;
pub mod split;
pub mod update;

pub use hints::{hints_for_all_elements, hints_for_element, top_level_hints_only};
pub use indexes::PathIndexes;
pub use lock::{IndexLock, IndexReadGuard, IndexWriteGuard};
pub use lookup::{Resolution, resolve, resolve_paths};
pub use split::split_element;
pub use update::{update_index, update_path_index, update_top_level_path_index};

/// One index record: the ordered paths that contributed to the id `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathHint {
    /// Full name of the id
    pub key: String,
    /// Contributing paths, first-seen first
    pub value: Vec<Path>,
}

impl PathHint {
    /// Creates a hint.
    pub fn new(key: impl Into<String>, value: Vec<Path>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Creates a hint keyed by `id`'s full name.
    pub fn for_id(id: &ElemId, value: impl IntoIterator<Item = Path>) -> Self {
        Self::new(id.full_name(), value.into_iter().collect())
    }

    /// The top-level element owning this hint, if the key parses as an id.
    pub fn owner(&self) -> Option<ElemId> {
        ElemId::from_full_name(&self.key)
            .ok()
            .map(|id| id.top_level_parent())
    }
}
