use pathindex::{PathHint, backend::InMemoryStore, index::split_element};

use crate::helpers::*;

#[tokio::test]
async fn test_unindexed_element_is_returned_untagged() {
    let store = InMemoryStore::new();
    let merged = instance_without_path("main", r#"{"a": 1}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [merged]);
}

#[tokio::test]
async fn test_single_owner_is_returned_whole() {
    let store = InMemoryStore::from_entries([PathHint::new(
        "adapter.Type.instance.main",
        vec![path("f1")],
    )]);
    let merged = instance_without_path("main", r#"{"a": 1, "b": {"c": 2}}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [merged.with_path(path("f1"))]);
}

#[tokio::test]
async fn test_instance_values_return_to_their_files() {
    let first = instance("main", r#"{"cfg": {"x": 1}, "name": "acme"}"#, "f1");
    let second = instance("main", r#"{"cfg": {"y": 2}}"#, "f2");
    let store = indexed_store(&[first.clone(), second.clone()]).await;
    let merged = instance_without_path("main", r#"{"cfg": {"x": 1, "y": 2}, "name": "acme"}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_object_type_returns_to_its_files() {
    let first = object("Account", "f1", |object| {
        object
            .annotation_types
            .insert("doc".to_string(), type_id("string"));
        object.annotations = values(r#"{"description": "accounts"}"#);
        add_field(object, field("Account", "name", r#"{"required": true}"#));
    });
    let second = object("Account", "f2", |object| {
        object.annotations = values(r#"{"owner": "finance"}"#);
        add_field(object, field("Account", "name", r#"{"label": "Name"}"#));
        add_field(object, field("Account", "age", "{}"));
    });
    let store = indexed_store(&[first.clone(), second.clone()]).await;

    let merged = object("Account", "unused", |object| {
        object
            .annotation_types
            .insert("doc".to_string(), type_id("string"));
        object.annotations = values(r#"{"description": "accounts", "owner": "finance"}"#);
        add_field(
            object,
            field("Account", "name", r#"{"required": true, "label": "Name"}"#),
        );
        add_field(object, field("Account", "age", "{}"));
    })
    .with_path(None::<pathindex::Path>);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_instance_annotations_and_values_keep_their_files() {
    let first = instance("main", r#"{"a": 1}"#, "f1");
    let second = annotated_instance("main", "{}", r#"{"a": "x"}"#).with_path(path("f2"));
    let store = indexed_store(&[first.clone(), second.clone()]).await;
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.main.a").await,
        Some(vec!["f1".to_string()])
    );
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.main.attr.a").await,
        Some(vec!["f2".to_string()])
    );

    let merged = annotated_instance("main", r#"{"a": 1}"#, r#"{"a": "x"}"#);
    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_value_named_attr_moves_whole() {
    let first = instance("main", r#"{"attr": {"k": 1}, "b": 1}"#, "f1");
    let second =
        annotated_instance("main", r#"{"c": 2}"#, r#"{"k": "x"}"#).with_path(path("f2"));
    let store = indexed_store(&[first.clone(), second.clone()]).await;
    assert_eq!(
        stored_keys(&store).await,
        [
            "adapter.Type.instance.main",
            "adapter.Type.instance.main.attr.k",
            "adapter.Type.instance.main.b",
            "adapter.Type.instance.main.c",
        ]
    );

    let merged = annotated_instance(
        "main",
        r#"{"attr": {"k": 1}, "b": 1, "c": 2}"#,
        r#"{"k": "x"}"#,
    );
    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_annotation_type_declared_twice_goes_to_both_files() {
    let first = object("Account", "f1", |object| {
        object
            .annotation_types
            .insert("doc".to_string(), type_id("string"));
        object
            .annotation_types
            .insert("owner".to_string(), type_id("string"));
    });
    let second = object("Account", "f2", |object| {
        object
            .annotation_types
            .insert("owner".to_string(), type_id("string"));
    });
    let store = indexed_store(&[first.clone(), second.clone()]).await;
    assert_eq!(
        stored_paths(&store, "adapter.Account.annotation.owner").await,
        Some(vec!["f1".to_string(), "f2".to_string()])
    );

    let merged = first.clone().with_path(None::<pathindex::Path>);
    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_ambiguous_list_goes_to_first_owner() {
    let store = indexed_store(&[
        instance("main", r#"{"tags": ["a"], "x": 1}"#, "f1"),
        instance("main", r#"{"tags": ["b"], "y": 2}"#, "f2"),
    ])
    .await;
    let merged = instance_without_path("main", r#"{"tags": ["a", "b"], "x": 1, "y": 2}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(
        fragments,
        [
            instance("main", r#"{"tags": ["a", "b"], "x": 1}"#, "f1"),
            instance("main", r#"{"y": 2}"#, "f2"),
        ]
    );
}

#[tokio::test]
async fn test_owned_empty_mapping_survives() {
    let first = instance("main", r#"{"opts": {}}"#, "f1");
    let second = instance("main", r#"{"b": 1}"#, "f2");
    let store = indexed_store(&[first.clone(), second.clone()]).await;
    let merged = instance_without_path("main", r#"{"opts": {}, "b": 1}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [first, second]);
}

#[tokio::test]
async fn test_paths_left_empty_are_dropped() {
    let store = indexed_store(&[
        instance("main", r#"{"a": 1}"#, "f1"),
        instance("main", r#"{"b": 2}"#, "f2"),
    ])
    .await;
    // `b` was removed from the merged element since indexing
    let merged = instance_without_path("main", r#"{"a": 1}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(fragments, [instance("main", r#"{"a": 1}"#, "f1")]);
}

#[tokio::test]
async fn test_repeated_paths_yield_one_fragment() {
    let store = InMemoryStore::from_entries([
        PathHint::new(
            "adapter.Type.instance.main",
            vec![path("f1"), path("f2"), path("f1")],
        ),
        PathHint::new("adapter.Type.instance.main.b", vec![path("f2")]),
    ]);
    let merged = instance_without_path("main", r#"{"a": 1, "b": 2}"#);

    let fragments = split_element(&merged, &store).await.unwrap();
    assert_eq!(
        fragments,
        [
            instance("main", r#"{"a": 1}"#, "f1"),
            instance("main", r#"{"b": 2}"#, "f2"),
        ]
    );
}
