//!
//! Pathindex: remembers where every part of a merged element came from.
//!
//! Workspaces load elements from many source files. One logical element may
//! be declared in fragments across several files and merged into a single
//! value. This library records, down to arbitrary nesting depth, which file
//! paths contributed each addressable part, so that the merged element can
//! later be split back into per-file fragments.
//!
//! ## Core Concepts
//!
//! * **Ids (`element::ElemId`)**: Hierarchical, dot-rendered identifiers
//!   addressing a type, its annotations and fields, an instance, a variable,
//!   or any value nested inside them.
//! * **Elements (`element::Element`)**: Object types, primitive types,
//!   instances and fields, each optionally tagged with the path it was read from.
//! * **Stores (`backend::PathIndexStore`)**: A pluggable asynchronous
//!   key-value layer persisting the index. `backend::InMemoryStore` is the
//!   bundled implementation.
//! * **Index (`index`)**: Hint computation, incremental updates, lookup with
//!   ancestor fallback, element splitting, and per-namespace export.
//!   `index::PathIndexes` ties the recursive and top-level indexes together.
//! * **Configuration (`config::IndexConfig`)**: Selects which indexes are kept.

pub mod backend;
pub mod config;
pub mod constants;
pub mod element;
pub mod index;

pub use element::{ElemId, Element, Path};
pub use index::{PathHint, PathIndexes};

/// Result type used throughout the Pathindex library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Pathindex library.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured id errors from the element module
    #[error(transparent)]
    Id(element::IdError),

    /// Structured store errors from the backend module
    #[error(transparent)]
    Store(backend::StoreError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Id(_) => "element",
            Error::Store(_) => "backend",
            Error::Config(_) => "config",
        }
    }

    /// Check if this error comes from parsing or building an id.
    pub fn is_id_error(&self) -> bool {
        matches!(self, Error::Id(_))
    }

    /// Check if this error was raised by a store.
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error indicates a store is temporarily unreachable.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_unavailable(),
            _ => false,
        }
    }

    /// Check if this error indicates corrupt index data.
    pub fn is_integrity_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_integrity_error(),
            _ => false,
        }
    }

    /// Check if this error is a JSON encoding or decoding failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
