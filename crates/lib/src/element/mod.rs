//! The in-memory element model.
//!
//! Elements are the logical configuration resources that get merged from
//! source fragments. This module holds the types the index reasons about:
//!
//! - [`ElemId`] - hierarchical id of an element or any nested part of it
//! - [`Path`] - opaque provenance key of a source fragment
//! - [`Fragment`] - a value paired with the path it came from
//! - [`Value`] / [`Values`] - nested annotation and instance values
//! - [`Element`] - closed sum of element kinds

mod errors;
mod id;
mod path;
mod types;
mod value;

pub use errors::IdError;
pub use id::{ElemId, IdType};
pub use path::{Fragment, Path};
pub use types::{
    Element, ElementKind, Field, InstanceElement, ObjectType, PrimitiveKind, PrimitiveType,
};
pub use value::{Value, Values};
