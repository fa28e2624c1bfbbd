//! Store error types for the pathindex backend.
//!
//! This module defines structured error types for path index store operations.
//! Store failures are never recovered locally: they abort the index operation
//! in progress and are surfaced to the caller as-is.

use thiserror::Error;

/// Errors that can occur during path index store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Field additions/changes require a major version bump
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected an operation.
    #[error("Store operation '{operation}' failed: {reason}")]
    OperationFailed {
        /// The rejected operation (`get`, `set_all`, ...)
        operation: String,
        /// Description of the failure
        reason: String,
    },

    /// The store cannot be reached at all.
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Description of the outage
        reason: String,
    },

    /// A stored entry could not be decoded.
    #[error("Corrupt store entry '{key}': {reason}")]
    CorruptEntry {
        /// Key of the corrupt entry
        key: String,
        /// Description of the corruption
        reason: String,
    },
}

impl StoreError {
    /// Builds an [`StoreError::OperationFailed`] for `operation`.
    pub fn operation_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::OperationFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error indicates the store is unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }

    /// Check if this error indicates a data integrity issue.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, StoreError::CorruptEntry { .. })
    }

    /// Get the failed operation name, if known.
    pub fn operation(&self) -> Option<&str> {
        match self {
            StoreError::OperationFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
