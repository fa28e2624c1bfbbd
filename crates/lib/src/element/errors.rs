//! Error types for element ids.
//!
//! Ids are parsed from rendered full names and built by appending segments,
//! both of which can fail on malformed input.

use thiserror::Error;

/// Errors that can occur while building or parsing an [`ElemId`](super::ElemId).
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    /// A segment is empty or contains the separator.
    #[error("Invalid id segment '{segment}': {reason}")]
    InvalidName {
        /// The offending segment
        segment: String,
        /// Why it was rejected
        reason: String,
    },

    /// The id type segment is not one of the known id types.
    #[error("Invalid id type '{id_type}' in '{full_name}'")]
    InvalidIdType {
        /// The unknown id type
        id_type: String,
        /// The full name being parsed
        full_name: String,
    },

    /// A full name needs at least an adapter and a type name.
    #[error("Id '{full_name}' has too few segments")]
    TooFewSegments {
        /// The full name being parsed
        full_name: String,
    },

    /// Variables must live in the `var` namespace and vice versa.
    #[error("Invalid variable id '{full_name}'")]
    InvalidVariable {
        /// The offending id
        full_name: String,
    },

    /// A bare type id cannot carry name parts.
    #[error("Type id '{full_name}' cannot have name parts")]
    NamePartsOnType {
        /// The offending id
        full_name: String,
    },
}

impl IdError {
    /// Check if this error was caused by a bad segment.
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, IdError::InvalidName { .. })
    }

    /// Check if this error was raised while parsing a full name.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            IdError::InvalidIdType { .. } | IdError::TooFewSegments { .. }
        )
    }
}

impl From<IdError> for crate::Error {
    fn from(err: IdError) -> Self {
        crate::Error::Id(err)
    }
}
