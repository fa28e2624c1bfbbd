//! Hierarchical element identifiers.
//!
//! An [`ElemId`] addresses a top-level element or any nested part of it. It
//! renders as a dot-joined full name:
//!
//! - `adapter.Type` for a type
//! - `adapter.Type.attr.key...` for type annotation values
//! - `adapter.Type.annotation.key...` for annotation type declarations
//! - `adapter.Type.field.name...` for fields and their annotations
//! - `adapter.Type.instance.name...` for instances and their values
//! - `var.name...` for variables
//!
//! ```rust
//! use pathindex::element::ElemId;
//! use std::str::FromStr;
//!
//! let id = ElemId::from_str("adapter.Account.instance.main.settings")?;
//! assert_eq!(id.top_level_parent().full_name(), "adapter.Account.instance.main");
//! assert_eq!(id.name(), "settings");
//! # Ok::<(), pathindex::element::IdError>(())
//! ```

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::errors::IdError;
use crate::constants::{
    ANNOTATION, ATTR, FIELD, INSTANCE, NAMESPACE_SEPARATOR, TYPE, VAR, VARIABLES_NAMESPACE,
};

/// The kind of location an [`ElemId`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdType {
    /// A bare type (`adapter.Type`)
    Type,
    /// A type annotation value (`adapter.Type.attr...`)
    Attr,
    /// An annotation type declaration (`adapter.Type.annotation...`)
    Annotation,
    /// A field or a value nested in its annotations
    Field,
    /// An instance or a value nested in it
    Instance,
    /// A variable (`var.name...`)
    Var,
}

impl IdType {
    /// Returns the segment name for this id type.
    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Type => TYPE,
            IdType::Attr => ATTR,
            IdType::Annotation => ANNOTATION,
            IdType::Field => FIELD,
            IdType::Instance => INSTANCE,
            IdType::Var => VAR,
        }
    }

    /// Parses an id type segment as it appears inside a full name.
    ///
    /// `type` and `var` are never rendered as a segment, so only the nested
    /// id types are accepted here.
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            ATTR => Some(IdType::Attr),
            ANNOTATION => Some(IdType::Annotation),
            FIELD => Some(IdType::Field),
            INSTANCE => Some(IdType::Instance),
            _ => None,
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn validate_segment(segment: &str) -> Result<(), IdError> {
    if segment.is_empty() {
        return Err(IdError::InvalidName {
            segment: segment.to_string(),
            reason: "segments cannot be empty".to_string(),
        });
    }
    if segment.contains(NAMESPACE_SEPARATOR) {
        return Err(IdError::InvalidName {
            segment: segment.to_string(),
            reason: "segments cannot contain dots".to_string(),
        });
    }
    Ok(())
}

/// Identifier of an element or any nested part of it.
///
/// Two ids are equal iff their full-name segments are equal, and ids are
/// totally ordered by their segment sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElemId {
    adapter: String,
    type_name: String,
    id_type: IdType,
    name_parts: Vec<String>,
}

impl ElemId {
    /// Creates a new id, validating every segment.
    ///
    /// # Errors
    /// Returns an error if a segment is empty or contains a dot, if a bare
    /// type id is given name parts, or if the `var` namespace and the `Var`
    /// id type are not used together.
    pub fn new<I, S>(
        adapter: impl Into<String>,
        type_name: impl Into<String>,
        id_type: IdType,
        name_parts: I,
    ) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = ElemId {
            adapter: adapter.into(),
            type_name: type_name.into(),
            id_type,
            name_parts: name_parts.into_iter().map(Into::into).collect(),
        };
        id.validate()?;
        Ok(id)
    }

    /// Creates a bare type id (`adapter.Type`).
    pub fn type_id(
        adapter: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Result<Self, IdError> {
        Self::new(adapter, type_name, IdType::Type, std::iter::empty::<String>())
    }

    /// Creates an instance id (`adapter.Type.instance.name`).
    pub fn instance_id(
        adapter: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdError> {
        Self::new(adapter, type_name, IdType::Instance, [name.into()])
    }

    /// Creates a field id (`adapter.Type.field.name`).
    pub fn field_id(
        adapter: impl Into<String>,
        type_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, IdError> {
        Self::new(adapter, type_name, IdType::Field, [name.into()])
    }

    /// Creates a variable id (`var.name`).
    pub fn variable_id(name: impl Into<String>) -> Result<Self, IdError> {
        Self::new(
            VARIABLES_NAMESPACE,
            name,
            IdType::Var,
            std::iter::empty::<String>(),
        )
    }

    fn validate(&self) -> Result<(), IdError> {
        validate_segment(&self.adapter)?;
        validate_segment(&self.type_name)?;
        for part in &self.name_parts {
            validate_segment(part)?;
        }
        if self.id_type == IdType::Type && !self.name_parts.is_empty() {
            return Err(IdError::NamePartsOnType {
                full_name: self.full_name(),
            });
        }
        if (self.id_type == IdType::Var) != (self.adapter == VARIABLES_NAMESPACE) {
            return Err(IdError::InvalidVariable {
                full_name: self.full_name(),
            });
        }
        Ok(())
    }

    /// Parses a rendered full name back into an id.
    pub fn from_full_name(full_name: &str) -> Result<Self, IdError> {
        let parts: Vec<&str> = full_name.split(NAMESPACE_SEPARATOR).collect();
        if parts.len() < 2 {
            return Err(IdError::TooFewSegments {
                full_name: full_name.to_string(),
            });
        }
        let (adapter, type_name) = (parts[0], parts[1]);

        if adapter == VARIABLES_NAMESPACE {
            return Self::new(adapter, type_name, IdType::Var, parts[2..].iter().copied());
        }
        if parts.len() == 2 {
            return Self::type_id(adapter, type_name);
        }
        let id_type = IdType::from_segment(parts[2]).ok_or_else(|| IdError::InvalidIdType {
            id_type: parts[2].to_string(),
            full_name: full_name.to_string(),
        })?;
        Self::new(adapter, type_name, id_type, parts[3..].iter().copied())
    }

    /// The adapter (namespace) segment.
    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    /// The type name segment. For variables this is the variable name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The kind of location this id points at.
    pub fn id_type(&self) -> IdType {
        self.id_type
    }

    /// Segments following the id type.
    pub fn name_parts(&self) -> &[String] {
        &self.name_parts
    }

    /// The last segment of the id.
    pub fn name(&self) -> &str {
        self.name_parts.last().unwrap_or(&self.type_name)
    }

    /// All segments of the rendered full name, in order.
    pub fn full_name_parts(&self) -> Vec<&str> {
        let mut parts = vec![self.adapter.as_str(), self.type_name.as_str()];
        if !matches!(self.id_type, IdType::Type | IdType::Var) {
            parts.push(self.id_type.as_str());
        }
        parts.extend(self.name_parts.iter().map(String::as_str));
        parts
    }

    /// The dot-joined full name.
    pub fn full_name(&self) -> String {
        self.full_name_parts().join(NAMESPACE_SEPARATOR)
    }

    /// Appends segments to this id.
    ///
    /// On a bare type id the first appended segment selects the id type, so
    /// `adapter.Type` + `["field", "name"]` yields `adapter.Type.field.name`.
    pub fn create_nested_id<I, S>(&self, names: I) -> Result<Self, IdError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = names.into_iter().map(Into::into).peekable();
        if names.peek().is_none() {
            return Ok(self.clone());
        }

        if self.id_type == IdType::Type {
            let first = names.next().unwrap_or_default();
            let id_type = IdType::from_segment(&first).ok_or_else(|| IdError::InvalidIdType {
                id_type: first.clone(),
                full_name: format!("{}{NAMESPACE_SEPARATOR}{first}", self.full_name()),
            })?;
            return Self::new(&*self.adapter, &*self.type_name, id_type, names);
        }

        let mut name_parts = self.name_parts.clone();
        name_parts.extend(names);
        Self::new(&*self.adapter, &*self.type_name, self.id_type, name_parts)
    }

    /// The id of the top-level element that owns this id.
    ///
    /// Fields, type annotations and annotation declarations belong to their
    /// type; nested instance values belong to the instance; nested variable
    /// values belong to the variable.
    pub fn top_level_parent(&self) -> ElemId {
        let name_parts = match self.id_type {
            IdType::Instance => self.name_parts.iter().take(1).cloned().collect(),
            _ => Vec::new(),
        };
        let id_type = match self.id_type {
            IdType::Instance => IdType::Instance,
            IdType::Var => IdType::Var,
            _ => IdType::Type,
        };
        ElemId {
            adapter: self.adapter.clone(),
            type_name: self.type_name.clone(),
            id_type,
            name_parts,
        }
    }

    /// Whether this id names a top-level element.
    pub fn is_top_level(&self) -> bool {
        self.top_level_parent() == *self
    }

    /// Keeps the first `len` segments of the full name.
    ///
    /// `len` is clamped to the current length; fewer than two segments cannot
    /// form an id and are rejected.
    pub fn truncate(&self, len: usize) -> Result<Self, IdError> {
        let parts = self.full_name_parts();
        let len = len.min(parts.len());
        if len < 2 {
            return Err(IdError::TooFewSegments {
                full_name: parts[..len].join(NAMESPACE_SEPARATOR),
            });
        }
        Self::from_full_name(&parts[..len].join(NAMESPACE_SEPARATOR))
    }
}

impl fmt::Display for ElemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl FromStr for ElemId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_full_name(s)
    }
}

impl TryFrom<String> for ElemId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_full_name(&s)
    }
}

impl TryFrom<&str> for ElemId {
    type Error = IdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_full_name(s)
    }
}

impl From<&ElemId> for String {
    fn from(id: &ElemId) -> Self {
        id.full_name()
    }
}

impl PartialOrd for ElemId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ElemId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.full_name_parts().cmp(&other.full_name_parts())
    }
}

// Ids travel as their full name
impl Serialize for ElemId {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.full_name().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ElemId::from_full_name(&s).map_err(serde::de::Error::custom)
    }
}
