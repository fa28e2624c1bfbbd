//! Nested values carried by elements.
//!
//! Annotation values and instance values are arbitrary trees of mappings,
//! lists and scalars. Mappings keep insertion order so that every traversal
//! over them is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An insertion-ordered mapping of values.
pub type Values = IndexMap<String, Value>;

/// A value inside an element.
///
/// # Value Types
///
/// ## Leaf Values
/// - [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Text`]
///
/// ## Branch Values
/// - [`Value::Map`] - Key-ordered mapping
/// - [`Value::List`] - Ordered list, addressed by index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Text string value
    Text(String),
    /// Ordered collection of values
    List(Vec<Value>),
    /// Nested key-ordered mapping
    Map(Values),
}

impl Value {
    /// Returns true if this is a leaf value
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Text(_)
        )
    }

    /// Returns true if this value can contain other values
    pub fn is_branch(&self) -> bool {
        !self.is_leaf()
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the mapping if this is a [`Value::Map`]
    pub fn as_map(&self) -> Option<&Values> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the list if this is a [`Value::List`]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the text if this is a [`Value::Text`]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Values> for Value {
    fn from(value: Values) -> Self {
        Value::Map(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
