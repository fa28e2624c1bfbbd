//! Path hint computation.
//!
//! Given the unmerged fragments of an element, these functions produce a flat
//! list of [`PathHint`]s covering every addressable sub-location that can be
//! attributed unambiguously. Everything here is pure and synchronous.
//!
//! Recursion stops as soon as a location is defined by a single fragment,
//! since nothing below it needs disambiguating. When fragments disagree in
//! shape (a list split across files, a scalar against a mapping) no hint is
//! produced for that location and lookups fall back to the nearest ancestor.

use indexmap::{IndexMap, IndexSet};
use tracing::{trace, warn};

use super::PathHint;
use crate::constants::{ANNOTATION, ATTR, NAMESPACE_SEPARATOR};
use crate::element::{
    ElemId, Element, ElementKind, Field, Fragment, IdError, ObjectType, Path, Value, Values,
};

/// How the fragments of one location relate to each other.
#[derive(Debug)]
enum Shape<'a> {
    /// No fragment defines the location.
    Empty,
    /// Exactly one fragment defines the location.
    Single(&'a Path),
    /// Every fragment holds a mapping; provenance continues per key.
    Mapping(Vec<Fragment<&'a Values>>),
    /// Fragments disagree in shape; provenance below this point is dropped.
    Ambiguous,
}

fn classify<'a>(fragments: &'a [Fragment<&'a Value>]) -> Shape<'a> {
    match fragments {
        [] => Shape::Empty,
        [single] => Shape::Single(&single.path),
        _ => fragments
            .iter()
            .map(|fragment| {
                fragment
                    .value
                    .as_map()
                    .map(|map| Fragment::new(map, fragment.path.clone()))
            })
            .collect::<Option<Vec<_>>>()
            .map_or(Shape::Ambiguous, Shape::Mapping),
    }
}

fn nested_or_warn(base: &ElemId, name: &str) -> Option<ElemId> {
    base.create_nested_id([name])
        .inspect_err(|err: &IdError| {
            warn!(base = %base, key = name, error = %err, "Key cannot be addressed, skipping its path hints");
        })
        .ok()
}

/// Computes hints for one nested value defined by `fragments`, rooted at `base`.
pub fn hints_for_value(fragments: &[Fragment<&Value>], base: &ElemId) -> Vec<PathHint> {
    match classify(fragments) {
        Shape::Empty => Vec::new(),
        Shape::Single(path) => vec![PathHint::for_id(base, [path.clone()])],
        Shape::Mapping(maps) => hints_for_mappings(&maps, base),
        Shape::Ambiguous => {
            trace!(id = %base, fragments = fragments.len(), "Fragments disagree in shape, no path hint");
            Vec::new()
        }
    }
}

/// Computes hints for a mapping defined by `fragments`, rooted at `base`.
///
/// Annotation values and instance value trees are always mappings, so this
/// is [`hints_for_value`] without the shape check.
pub fn hints_for_values(fragments: &[Fragment<&Values>], base: &ElemId) -> Vec<PathHint> {
    match fragments {
        [] => Vec::new(),
        [single] => vec![PathHint::for_id(base, [single.path.clone()])],
        _ => hints_for_mappings(fragments, base),
    }
}

fn hints_for_mappings(fragments: &[Fragment<&Values>], base: &ElemId) -> Vec<PathHint> {
    let keys: IndexSet<&str> = fragments
        .iter()
        .flat_map(|fragment| fragment.value.keys().map(String::as_str))
        .collect();

    keys.into_iter()
        .flat_map(|key| {
            let Some(nested) = nested_or_warn(base, key) else {
                return Vec::new();
            };
            let defining: Vec<Fragment<&Value>> = fragments
                .iter()
                .filter_map(|fragment| {
                    fragment
                        .value
                        .get(key)
                        .map(|value| Fragment::new(value, fragment.path.clone()))
                })
                .collect();
            hints_for_value(&defining, &nested)
        })
        .collect()
}

/// Hints for annotation type declarations of a type-like element.
fn annotation_type_hints(elem_id: &ElemId, fragments: &[&Fragment<&Element>]) -> Vec<PathHint> {
    let declaring: Vec<(&IndexMap<String, ElemId>, &Path)> = fragments
        .iter()
        .filter_map(|fragment| {
            fragment
                .value
                .annotation_types()
                .filter(|types| !types.is_empty())
                .map(|types| (types, &fragment.path))
        })
        .collect();
    let Some(base) = nested_or_warn(elem_id, ANNOTATION) else {
        return Vec::new();
    };

    match declaring.as_slice() {
        [] => Vec::new(),
        [(_, path)] => vec![PathHint::for_id(&base, [(*path).clone()])],
        _ => {
            let mut owners: IndexMap<&str, Vec<Path>> = IndexMap::new();
            for (types, path) in &declaring {
                for key in types.keys() {
                    owners.entry(key.as_str()).or_default().push((*path).clone());
                }
            }
            owners
                .into_iter()
                .filter_map(|(key, paths)| {
                    nested_or_warn(&base, key).map(|id| PathHint::for_id(&id, paths))
                })
                .collect()
        }
    }
}

/// Hints for annotation values. Fields address them directly under their id,
/// types and instances under `id.attr`.
fn annotation_value_hints(
    elem_id: &ElemId,
    kind: ElementKind,
    fragments: &[&Fragment<&Element>],
) -> Vec<PathHint> {
    let base = match kind {
        ElementKind::Field => elem_id.clone(),
        _ => match nested_or_warn(elem_id, ATTR) {
            Some(base) => base,
            None => return Vec::new(),
        },
    };
    let annotations: Vec<Fragment<&Values>> = fragments
        .iter()
        .map(|fragment| Fragment::new(fragment.value.annotations(), fragment.path.clone()))
        .collect();
    hints_for_values(&annotations, &base)
}

fn field_fragment_hints(fragments: &[Fragment<&Field>]) -> Vec<PathHint> {
    let Some(first) = fragments.first() else {
        return Vec::new();
    };
    let field_id = &first.value.elem_id;
    if fragments.len() == 1 {
        return vec![PathHint::for_id(field_id, [first.path.clone()])];
    }

    let annotations: Vec<Fragment<&Values>> = fragments
        .iter()
        .cloned()
        .map(|fragment| fragment.map(|field| &field.annotations))
        .collect();
    let mut hints = hints_for_values(&annotations, field_id);
    hints.push(PathHint::for_id(
        field_id,
        fragments.iter().map(|fragment| fragment.path.clone()),
    ));
    hints
}

fn field_hints(fragments: &[&Fragment<&Element>]) -> Vec<PathHint> {
    let objects: Vec<Fragment<&ObjectType>> = fragments
        .iter()
        .filter_map(|fragment| match fragment.value {
            Element::Object(object) => Some(Fragment::new(object, fragment.path.clone())),
            _ => None,
        })
        .collect();
    let names: IndexSet<&str> = objects
        .iter()
        .flat_map(|fragment| fragment.value.fields.keys().map(String::as_str))
        .collect();

    names
        .into_iter()
        .flat_map(|name| {
            let field_fragments: Vec<Fragment<&Field>> = objects
                .iter()
                .filter_map(|fragment| {
                    fragment
                        .value
                        .fields
                        .get(name)
                        .map(|field| Fragment::new(field, fragment.path.clone()))
                })
                .collect();
            field_fragment_hints(&field_fragments)
        })
        .collect()
}

/// Hints for instance values. A top-level value keyed `attr` shares its id
/// with the annotation namespace and is left to the element-level hint.
fn instance_value_hints(elem_id: &ElemId, fragments: &[&Fragment<&Element>]) -> Vec<PathHint> {
    let values: Vec<Fragment<&Values>> = fragments
        .iter()
        .filter_map(|fragment| match fragment.value {
            Element::Instance(instance) => {
                Some(Fragment::new(&instance.value, fragment.path.clone()))
            }
            _ => None,
        })
        .collect();
    let mut hints = hints_for_values(&values, elem_id);
    if values.len() > 1 && values.iter().any(|fragment| fragment.value.contains_key(ATTR)) {
        warn!(id = %elem_id, key = ATTR, "Instance value uses the annotation namespace, skipping its path hints");
        let reserved = format!("{elem_id}{NAMESPACE_SEPARATOR}{ATTR}");
        hints.retain(|hint| {
            hint.key
                .strip_prefix(&reserved)
                .is_none_or(|rest| !(rest.is_empty() || rest.starts_with(NAMESPACE_SEPARATOR)))
        });
    }
    hints
}

/// Computes every hint for the fragments of one element.
///
/// All fragments are expected to share one id and kind. Fragments whose kind
/// differs from the first one only count towards the element-level hint.
pub fn hints_for_element(fragments: &[Fragment<&Element>]) -> Vec<PathHint> {
    let Some(first) = fragments.first() else {
        return Vec::new();
    };
    let elem_id = first.value.elem_id();
    if fragments.len() == 1 {
        return vec![PathHint::for_id(elem_id, [first.path.clone()])];
    }

    let kind = first.value.kind();
    let same_kind: Vec<&Fragment<&Element>> = fragments
        .iter()
        .filter(|fragment| fragment.value.kind() == kind)
        .collect();
    if same_kind.len() != fragments.len() {
        warn!(
            id = %elem_id,
            expected = ?kind,
            mismatched = fragments.len() - same_kind.len(),
            "Element fragments disagree in kind, indexing them at element level only"
        );
    }

    let mut hints = Vec::new();
    if kind.is_type_like() {
        hints.extend(annotation_type_hints(elem_id, &same_kind));
    }
    hints.extend(annotation_value_hints(elem_id, kind, &same_kind));
    match kind {
        ElementKind::Object => hints.extend(field_hints(&same_kind)),
        ElementKind::Instance => hints.extend(instance_value_hints(elem_id, &same_kind)),
        ElementKind::Primitive | ElementKind::Field => {}
    }
    hints.push(PathHint::for_id(
        elem_id,
        fragments.iter().map(|fragment| fragment.path.clone()),
    ));
    hints
}

/// Groups elements carrying a path by full name, keeping first-seen order.
fn fragments_by_id(elements: &[Element]) -> IndexMap<String, Vec<Fragment<&Element>>> {
    let mut groups: IndexMap<String, Vec<Fragment<&Element>>> = IndexMap::new();
    for element in elements {
        let Some(path) = element.path() else {
            trace!(id = %element.elem_id(), "Element has no path, not indexed");
            continue;
        };
        groups
            .entry(element.elem_id().full_name())
            .or_default()
            .push(Fragment::new(element, path.clone()));
    }
    groups
}

/// Computes the recursive hints for a set of unmerged elements.
pub fn hints_for_all_elements(elements: &[Element]) -> Vec<PathHint> {
    fragments_by_id(elements)
        .values()
        .flat_map(|fragments| hints_for_element(fragments))
        .collect()
}

/// Computes one hint per element id, listing all of its fragment paths.
pub fn top_level_hints_only(elements: &[Element]) -> Vec<PathHint> {
    fragments_by_id(elements)
        .into_iter()
        .map(|(key, fragments)| {
            PathHint::new(
                key,
                fragments.into_iter().map(|fragment| fragment.path).collect(),
            )
        })
        .collect()
}
