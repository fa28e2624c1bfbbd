//! Constants used throughout the pathindex library.
//!
//! This module provides central definitions for the id separator and the
//! reserved segment names that select an id type.

/// Separator between the segments of a rendered element id.
pub const NAMESPACE_SEPARATOR: &str = ".";

/// Adapter name reserved for variable ids (`var.<name>`).
pub const VARIABLES_NAMESPACE: &str = "var";

/// Segment for annotation values of types (`adapter.type.attr.<key>`) and
/// instances (`adapter.type.instance.name.attr.<key>`).
pub const ATTR: &str = "attr";

/// Id type segment for annotation type declarations (`adapter.type.annotation.<key>`).
pub const ANNOTATION: &str = "annotation";

/// Id type segment for fields (`adapter.type.field.<name>`).
pub const FIELD: &str = "field";

/// Id type segment for instances (`adapter.type.instance.<name>`).
pub const INSTANCE: &str = "instance";

/// Id type name for bare type ids. Never rendered into a full name.
pub const TYPE: &str = "type";

/// Id type name for variables. Rendered as the adapter, not as a segment.
pub const VAR: &str = "var";
