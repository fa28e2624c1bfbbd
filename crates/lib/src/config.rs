//! Index configuration.
//!
//! [`IndexConfig`] selects which index granularities a [`PathIndexes`]
//! maintains. It is plain serde data so that the owning workspace can keep
//! it alongside the rest of its settings.
//!
//! [`PathIndexes`]: crate::index::PathIndexes

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by invalid configuration.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting holds a value that cannot be used.
    #[error("Invalid index configuration '{field}': {reason}")]
    Invalid {
        /// The offending setting
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

impl From<ConfigError> for crate::Error {
    fn from(err: ConfigError) -> Self {
        crate::Error::Config(err)
    }
}

/// Which path indexes to maintain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Maintain the recursive index used for lookups and splitting.
    pub track_paths: bool,
    /// Maintain the coarse index of top-level ids.
    pub track_top_level: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            track_paths: true,
            track_top_level: true,
        }
    }
}

impl IndexConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// Missing settings take their default value.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration maintains at least one index.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.track_paths && !self.track_top_level {
            return Err(ConfigError::Invalid {
                field: "track_paths".to_string(),
                reason: "at least one index must be tracked".to_string(),
            });
        }
        Ok(())
    }
}
