//! Splitting merged elements back into per-path fragments.
//!
//! A merged element is partitioned by asking the index which paths own each
//! of its addressable parts. Ownership is decided top-down:
//!
//! - a part indexed under its own id belongs to exactly the recorded paths,
//!   and a container dropped this way takes its children with it;
//! - a leaf that is not indexed itself belongs to the single owner its
//!   nearest indexed ancestor resolves to;
//! - a container that is not indexed itself is kept in a fragment whenever
//!   any of its children are.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use super::lookup::{Resolution, resolve};
use crate::Result;
use crate::backend::PathIndexStore;
use crate::constants::{ANNOTATION, ATTR};
use crate::element::{
    ElemId, Element, Field, InstanceElement, ObjectType, Path, PrimitiveType, Value, Values,
};

/// Ownership of one location, as seen by the fragment being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// The location is indexed under its own id.
    Exact(bool),
    /// The location inherits an ancestor's single owner.
    Inherited(bool),
}

impl Claim {
    fn owned(self) -> bool {
        match self {
            Claim::Exact(owned) | Claim::Inherited(owned) => owned,
        }
    }
}

type Oracle<'a> = dyn FnMut(&ElemId) -> Claim + 'a;

fn filter_value(id: &ElemId, value: &Value, claim: &mut Oracle<'_>) -> Option<Value> {
    let verdict = claim(id);
    match value {
        Value::Map(map) => {
            if verdict == Claim::Exact(false) {
                return None;
            }
            if map.is_empty() {
                return verdict.owned().then(|| value.clone());
            }
            let filtered = filter_values(id, map, claim);
            (!filtered.is_empty()).then_some(Value::Map(filtered))
        }
        Value::List(items) => {
            if verdict == Claim::Exact(false) {
                return None;
            }
            if items.is_empty() {
                return verdict.owned().then(|| value.clone());
            }
            let filtered: Vec<Value> = items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| match id.create_nested_id([index.to_string()]) {
                    Ok(item_id) => filter_value(&item_id, item, claim),
                    Err(_) => verdict.owned().then(|| item.clone()),
                })
                .collect();
            (!filtered.is_empty()).then_some(Value::List(filtered))
        }
        leaf => verdict.owned().then(|| leaf.clone()),
    }
}

/// Filters one entry of a mapping addressed at `base.<key>`.
///
/// Keys that cannot be addressed follow the ownership of `base` itself.
fn filter_entry(base: &ElemId, key: &str, value: &Value, claim: &mut Oracle<'_>) -> Option<Value> {
    match base.create_nested_id([key]) {
        Ok(id) => filter_value(&id, value, claim),
        Err(_) => claim(base).owned().then(|| value.clone()),
    }
}

fn filter_values(base: &ElemId, values: &Values, claim: &mut Oracle<'_>) -> Values {
    values
        .iter()
        .filter_map(|(key, value)| {
            filter_entry(base, key, value, claim).map(|value| (key.clone(), value))
        })
        .collect()
}

/// Filters an instance value tree.
///
/// A top-level `attr` entry shares its id with the annotation namespace. It
/// is never indexed itself and moves whole with the owner `id.attr` resolves to.
fn filter_instance_value(elem_id: &ElemId, values: &Values, claim: &mut Oracle<'_>) -> Values {
    values
        .iter()
        .filter_map(|(key, value)| {
            let filtered = if key == ATTR {
                let owner = elem_id.create_nested_id([ATTR]).unwrap_or_else(|_| elem_id.clone());
                claim(&owner).owned().then(|| value.clone())
            } else {
                filter_entry(elem_id, key, value, claim)
            };
            filtered.map(|value| (key.clone(), value))
        })
        .collect()
}

fn filter_namespace(
    elem_id: &ElemId,
    namespace: &str,
    values: &Values,
    claim: &mut Oracle<'_>,
) -> Values {
    match elem_id.create_nested_id([namespace]) {
        Ok(base) => filter_values(&base, values, claim),
        Err(_) => values.clone(),
    }
}

fn filter_annotation_types(
    elem_id: &ElemId,
    types: &IndexMap<String, ElemId>,
    claim: &mut Oracle<'_>,
) -> IndexMap<String, ElemId> {
    let Ok(base) = elem_id.create_nested_id([ANNOTATION]) else {
        return types.clone();
    };
    types
        .iter()
        .filter(|(key, _)| match base.create_nested_id([key.as_str()]) {
            Ok(id) => claim(&id).owned(),
            Err(_) => true,
        })
        .map(|(key, type_id)| (key.clone(), type_id.clone()))
        .collect()
}

fn filter_field(field: &Field, claim: &mut Oracle<'_>) -> Option<Field> {
    if !claim(&field.elem_id).owned() {
        return None;
    }
    Some(Field {
        elem_id: field.elem_id.clone(),
        type_id: field.type_id.clone(),
        annotations: filter_values(&field.elem_id, &field.annotations, claim),
        path: field.path.clone(),
    })
}

fn filter_element(element: &Element, claim: &mut Oracle<'_>) -> Option<Element> {
    if !claim(element.elem_id()).owned() {
        return None;
    }
    let filtered = match element {
        Element::Object(object) => Element::Object(ObjectType {
            elem_id: object.elem_id.clone(),
            annotation_types: filter_annotation_types(
                &object.elem_id,
                &object.annotation_types,
                claim,
            ),
            annotations: filter_namespace(&object.elem_id, ATTR, &object.annotations, claim),
            fields: object
                .fields
                .iter()
                .filter_map(|(name, field)| filter_field(field, claim).map(|f| (name.clone(), f)))
                .collect(),
            path: object.path.clone(),
        }),
        Element::Primitive(primitive) => Element::Primitive(PrimitiveType {
            elem_id: primitive.elem_id.clone(),
            primitive: primitive.primitive,
            annotation_types: filter_annotation_types(
                &primitive.elem_id,
                &primitive.annotation_types,
                claim,
            ),
            annotations: filter_namespace(
                &primitive.elem_id,
                ATTR,
                &primitive.annotations,
                claim,
            ),
            path: primitive.path.clone(),
        }),
        Element::Instance(instance) => Element::Instance(InstanceElement {
            elem_id: instance.elem_id.clone(),
            type_id: instance.type_id.clone(),
            value: filter_instance_value(&instance.elem_id, &instance.value, claim),
            annotations: filter_namespace(
                &instance.elem_id,
                ATTR,
                &instance.annotations,
                claim,
            ),
            path: instance.path.clone(),
        }),
        Element::Field(field) => Element::Field(filter_field(field, claim)?),
    };
    Some(filtered)
}

/// Every id the splitter will ask about, in traversal order.
fn addressable_ids(element: &Element) -> Vec<ElemId> {
    let mut ids = Vec::new();
    filter_element(element, &mut |id: &ElemId| {
        ids.push(id.clone());
        Claim::Exact(true)
    });
    ids
}

/// Splits a merged element into one fragment per owning path.
///
/// An element owned by at most one path is returned whole, tagged with that
/// path (or untagged when the index knows nothing about it). Otherwise each
/// distinct path gets a copy holding only the parts it owns, in the order the
/// index lists the paths. Copies left with no content are dropped.
pub async fn split_element<S>(element: &Element, store: &S) -> Result<Vec<Element>>
where
    S: PathIndexStore + ?Sized,
{
    let paths = resolve(element.elem_id(), store).await?.paths;
    if paths.len() <= 1 {
        return Ok(vec![element.clone().with_path(paths.into_iter().next())]);
    }

    let mut resolutions: HashMap<String, Resolution> = HashMap::new();
    for id in addressable_ids(element) {
        let key = id.full_name();
        if !resolutions.contains_key(&key) {
            let resolution = resolve(&id, store).await?;
            resolutions.insert(key, resolution);
        }
    }

    let mut distinct: Vec<Path> = Vec::with_capacity(paths.len());
    for path in paths {
        if !distinct.contains(&path) {
            distinct.push(path);
        }
    }

    let mut fragments = Vec::with_capacity(distinct.len());
    for path in distinct {
        let mut claim = |id: &ElemId| match resolutions.get(&id.full_name()) {
            Some(resolution) if resolution.exact => Claim::Exact(resolution.contains(&path)),
            Some(resolution) => Claim::Inherited(resolution.contains(&path)),
            None => Claim::Inherited(false),
        };
        match filter_element(element, &mut claim) {
            Some(fragment) if !fragment.is_empty() => {
                fragments.push(fragment.with_path(path));
            }
            _ => debug!(id = %element.elem_id(), path = %path, "Nothing left for path, dropping fragment"),
        }
    }
    Ok(fragments)
}
