//! Element kinds.
//!
//! [`Element`] is a closed sum over the kinds of top-level configuration
//! resources. Each kind owns its id, its annotation values and the structure
//! specific to it. An element carries a [`Path`] when it came from a single
//! source fragment and none when it is the product of a multi-source merge.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{ElemId, Path, Values};

/// Discriminant of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// [`ObjectType`]
    Object,
    /// [`PrimitiveType`]
    Primitive,
    /// [`InstanceElement`]
    Instance,
    /// [`Field`]
    Field,
}

impl ElementKind {
    /// Type-like kinds may declare annotation types.
    pub fn is_type_like(&self) -> bool {
        matches!(self, ElementKind::Object | ElementKind::Primitive)
    }
}

/// The primitive a [`PrimitiveType`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Text values
    String,
    /// Numeric values
    Number,
    /// Boolean values
    Boolean,
    /// Any value
    Unknown,
}

/// A field of an [`ObjectType`], also usable as a standalone element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Id of the field (`adapter.Type.field.name`)
    pub elem_id: ElemId,
    /// Id of the field's type
    pub type_id: ElemId,
    /// Annotation values, addressed at `elem_id.<key>`
    #[serde(default)]
    pub annotations: Values,
    /// Source of this fragment, if unambiguous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
}

impl Field {
    /// Creates a field without annotations.
    pub fn new(elem_id: ElemId, type_id: ElemId) -> Self {
        Self {
            elem_id,
            type_id,
            annotations: Values::new(),
            path: None,
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        self.elem_id.name()
    }

    /// Id of the object type that owns this field.
    pub fn parent_id(&self) -> ElemId {
        self.elem_id.top_level_parent()
    }
}

/// A structured type with fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Id of the type (`adapter.Type`)
    pub elem_id: ElemId,
    /// Declared annotation types, addressed at `elem_id.annotation.<key>`
    #[serde(default)]
    pub annotation_types: IndexMap<String, ElemId>,
    /// Annotation values, addressed at `elem_id.attr.<key>`
    #[serde(default)]
    pub annotations: Values,
    /// Fields by name, addressed at `elem_id.field.<name>`
    #[serde(default)]
    pub fields: IndexMap<String, Field>,
    /// Source of this fragment, if unambiguous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
}

impl ObjectType {
    /// Creates an empty object type.
    pub fn new(elem_id: ElemId) -> Self {
        Self {
            elem_id,
            annotation_types: IndexMap::new(),
            annotations: Values::new(),
            fields: IndexMap::new(),
            path: None,
        }
    }
}

/// A type wrapping a primitive value kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveType {
    /// Id of the type (`adapter.Type`)
    pub elem_id: ElemId,
    /// The wrapped primitive
    pub primitive: PrimitiveKind,
    /// Declared annotation types, addressed at `elem_id.annotation.<key>`
    #[serde(default)]
    pub annotation_types: IndexMap<String, ElemId>,
    /// Annotation values, addressed at `elem_id.attr.<key>`
    #[serde(default)]
    pub annotations: Values,
    /// Source of this fragment, if unambiguous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
}

/// A concrete instance of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceElement {
    /// Id of the instance (`adapter.Type.instance.name`)
    pub elem_id: ElemId,
    /// Id of the instance's type
    pub type_id: ElemId,
    /// The value tree, addressed at `elem_id.<key>...`
    #[serde(default)]
    pub value: Values,
    /// Annotation values, addressed at `elem_id.attr.<key>`
    #[serde(default)]
    pub annotations: Values,
    /// Source of this fragment, if unambiguous
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
}

impl InstanceElement {
    /// Creates an instance with the given value tree.
    pub fn new(elem_id: ElemId, type_id: ElemId, value: Values) -> Self {
        Self {
            elem_id,
            type_id,
            value,
            annotations: Values::new(),
            path: None,
        }
    }
}

/// A logical configuration resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    /// A structured type
    Object(ObjectType),
    /// A primitive type
    Primitive(PrimitiveType),
    /// An instance of a type
    Instance(InstanceElement),
    /// A standalone field
    Field(Field),
}

impl Element {
    /// The element's id.
    pub fn elem_id(&self) -> &ElemId {
        match self {
            Element::Object(e) => &e.elem_id,
            Element::Primitive(e) => &e.elem_id,
            Element::Instance(e) => &e.elem_id,
            Element::Field(e) => &e.elem_id,
        }
    }

    /// The element's kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Object(_) => ElementKind::Object,
            Element::Primitive(_) => ElementKind::Primitive,
            Element::Instance(_) => ElementKind::Instance,
            Element::Field(_) => ElementKind::Field,
        }
    }

    /// The source this element came from, if unambiguous.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Element::Object(e) => e.path.as_ref(),
            Element::Primitive(e) => e.path.as_ref(),
            Element::Instance(e) => e.path.as_ref(),
            Element::Field(e) => e.path.as_ref(),
        }
    }

    /// Sets or clears the element's source.
    pub fn set_path(&mut self, path: Option<Path>) {
        let slot = match self {
            Element::Object(e) => &mut e.path,
            Element::Primitive(e) => &mut e.path,
            Element::Instance(e) => &mut e.path,
            Element::Field(e) => &mut e.path,
        };
        *slot = path;
    }

    /// Builder-style [`Element::set_path`].
    pub fn with_path(mut self, path: impl Into<Option<Path>>) -> Self {
        self.set_path(path.into());
        self
    }

    /// The element's annotation values.
    pub fn annotations(&self) -> &Values {
        match self {
            Element::Object(e) => &e.annotations,
            Element::Primitive(e) => &e.annotations,
            Element::Instance(e) => &e.annotations,
            Element::Field(e) => &e.annotations,
        }
    }

    /// Declared annotation types, for type-like elements.
    pub fn annotation_types(&self) -> Option<&IndexMap<String, ElemId>> {
        match self {
            Element::Object(e) => Some(&e.annotation_types),
            Element::Primitive(e) => Some(&e.annotation_types),
            Element::Instance(_) | Element::Field(_) => None,
        }
    }

    /// True when the element retains no content beyond its id and type.
    pub fn is_empty(&self) -> bool {
        match self {
            Element::Object(e) => {
                e.annotations.is_empty() && e.annotation_types.is_empty() && e.fields.is_empty()
            }
            Element::Primitive(e) => e.annotations.is_empty() && e.annotation_types.is_empty(),
            Element::Instance(e) => e.value.is_empty() && e.annotations.is_empty(),
            Element::Field(e) => e.annotations.is_empty(),
        }
    }
}

impl From<ObjectType> for Element {
    fn from(e: ObjectType) -> Self {
        Element::Object(e)
    }
}

impl From<PrimitiveType> for Element {
    fn from(e: PrimitiveType) -> Self {
        Element::Primitive(e)
    }
}

impl From<InstanceElement> for Element {
    fn from(e: InstanceElement) -> Self {
        Element::Instance(e)
    }
}

impl From<Field> for Element {
    fn from(e: Field) -> Self {
        Element::Field(e)
    }
}
