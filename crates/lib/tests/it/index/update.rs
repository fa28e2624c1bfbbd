use pathindex::{
    PathHint,
    backend::{InMemoryStore, PathIndexStore},
    index::{IndexLock, update_index, update_path_index, update_top_level_path_index},
};

use crate::helpers::*;

#[tokio::test]
async fn test_rebuild_replaces_everything() {
    let store = InMemoryStore::from_entries([PathHint::new("adapter.Old", vec![path("gone")])]);
    let lock = IndexLock::new();
    let guard = lock.write().await;

    update_path_index(
        &store,
        &guard,
        &[
            instance("main", r#"{"a": 1}"#, "f1"),
            instance("main", r#"{"b": 2}"#, "f2"),
        ],
        None,
    )
    .await
    .unwrap();

    assert_eq!(
        stored_keys(&store).await,
        [
            "adapter.Type.instance.main",
            "adapter.Type.instance.main.a",
            "adapter.Type.instance.main.b",
        ]
    );
}

#[tokio::test]
async fn test_rebuild_with_nothing_empties_the_store() {
    let store = indexed_store(&[instance("main", "{}", "f1")]).await;
    let lock = IndexLock::new();
    let guard = lock.write().await;

    update_path_index(&store, &guard, &[], None).await.unwrap();
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_incremental_prunes_unknown_ids() {
    let store = indexed_store(&[
        instance("keep", r#"{"a": 1}"#, "f1"),
        instance("keep", r#"{"b": 2}"#, "f2"),
        instance("drop", "{}", "f3"),
    ])
    .await;
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type.instance.keep"]);

    update_path_index(&store, &guard, &[], Some(&known))
        .await
        .unwrap();

    assert_eq!(
        stored_keys(&store).await,
        [
            "adapter.Type.instance.keep",
            "adapter.Type.instance.keep.a",
            "adapter.Type.instance.keep.b",
        ]
    );
}

#[tokio::test]
async fn test_incremental_replaces_entries_of_changed_elements() {
    let store = indexed_store(&[
        instance("main", r#"{"a": 1}"#, "f1"),
        instance("main", r#"{"b": 2}"#, "f2"),
        instance("other", "{}", "f3"),
    ])
    .await;
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type.instance.main", "adapter.Type.instance.other"]);

    // `main` now lives in one file only
    update_path_index(
        &store,
        &guard,
        &[instance("main", r#"{"a": 1}"#, "f1")],
        Some(&known),
    )
    .await
    .unwrap();

    assert_eq!(
        stored_keys(&store).await,
        ["adapter.Type.instance.main", "adapter.Type.instance.other"]
    );
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.main").await,
        Some(vec!["f1".to_string()])
    );
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.other").await,
        Some(vec!["f3".to_string()])
    );
}

#[tokio::test]
async fn test_incremental_field_update_keeps_type_entries() {
    let store = indexed_store(&[
        object("Account", "f1", |object| {
            object.annotations = values(r#"{"description": "accounts"}"#);
        }),
        object("Account", "f2", |object| {
            object.annotations = values(r#"{"owner": "finance"}"#);
        }),
        instance("main", "{}", "f4"),
    ])
    .await;
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Account", "adapter.Type.instance.main"]);

    let extra = pathindex::Element::from(field("Account", "extra", "{}")).with_path(path("f3"));
    update_path_index(&store, &guard, &[extra], Some(&known))
        .await
        .unwrap();

    assert_eq!(
        stored_keys(&store).await,
        [
            "adapter.Account",
            "adapter.Account.attr.description",
            "adapter.Account.attr.owner",
            "adapter.Account.field.extra",
            "adapter.Type.instance.main",
        ]
    );
    assert_eq!(
        stored_paths(&store, "adapter.Account").await,
        Some(vec!["f1".to_string(), "f2".to_string()])
    );
    assert_eq!(
        stored_paths(&store, "adapter.Account.field.extra").await,
        Some(vec!["f3".to_string()])
    );
}

#[tokio::test]
async fn test_incremental_type_update_keeps_its_instances() {
    let store = indexed_store(&[
        object("Type", "f1", |object| {
            object.annotations = values(r#"{"a": 1}"#);
        }),
        object("Type", "f2", |object| {
            object.annotations = values(r#"{"b": 2}"#);
        }),
        instance("main", r#"{"a": 1}"#, "f1"),
        instance("main", r#"{"b": 2}"#, "f2"),
    ])
    .await;
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type", "adapter.Type.instance.main"]);

    let moved = object("Type", "f3", |object| {
        object.annotations = values(r#"{"a": 1, "b": 2}"#);
    });
    update_path_index(&store, &guard, &[moved], Some(&known))
        .await
        .unwrap();

    assert_eq!(
        stored_keys(&store).await,
        [
            "adapter.Type",
            "adapter.Type.instance.main",
            "adapter.Type.instance.main.a",
            "adapter.Type.instance.main.b",
        ]
    );
    assert_eq!(
        stored_paths(&store, "adapter.Type").await,
        Some(vec!["f3".to_string()])
    );
}

#[tokio::test]
async fn test_incremental_skips_changed_elements_outside_known_ids() {
    let store = InMemoryStore::new();
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type.instance.main"]);

    update_path_index(
        &store,
        &guard,
        &[
            instance("main", "{}", "f1"),
            instance("deleted", "{}", "f2"),
        ],
        Some(&known),
    )
    .await
    .unwrap();

    assert_eq!(stored_keys(&store).await, ["adapter.Type.instance.main"]);
}

#[tokio::test]
async fn test_incremental_deletes_malformed_keys() {
    let store = InMemoryStore::from_entries([
        PathHint::new("garbage", vec![path("f1")]),
        PathHint::new("adapter.Type.bogus.x", vec![path("f1")]),
        PathHint::new("adapter.Type.instance.main", vec![path("f1")]),
    ]);
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type.instance.main"]);

    update_path_index(&store, &guard, &[], Some(&known))
        .await
        .unwrap();

    assert_eq!(stored_keys(&store).await, ["adapter.Type.instance.main"]);
}

#[tokio::test]
async fn test_update_is_idempotent() {
    let changed = [
        instance("main", r#"{"cfg": {"x": 1}}"#, "f1"),
        instance("main", r#"{"cfg": {"y": 2}}"#, "f2"),
    ];
    let known = ids(&["adapter.Type.instance.main"]);
    let lock = IndexLock::new();

    for known_ids in [None, Some(&known)] {
        let store = InMemoryStore::from_entries([
            PathHint::new("adapter.Type.instance.stale", vec![path("f9")]),
            PathHint::new("adapter.Type.instance.main.old", vec![path("f9")]),
        ]);
        let guard = lock.write().await;

        update_path_index(&store, &guard, &changed, known_ids)
            .await
            .unwrap();
        let once = store.snapshot().await;
        update_path_index(&store, &guard, &changed, known_ids)
            .await
            .unwrap();

        assert_eq!(store.snapshot().await, once);
        assert!(!once.contains_key("adapter.Type.instance.stale"));
        assert!(!once.contains_key("adapter.Type.instance.main.old"));
    }
}

#[tokio::test]
async fn test_surviving_keys_belong_to_known_ids() {
    let store = indexed_store(&[
        instance("a", r#"{"x": 1}"#, "f1"),
        instance("a", r#"{"y": 2}"#, "f2"),
        instance("b", r#"{"x": 1}"#, "f1"),
        instance("b", r#"{"y": 2}"#, "f2"),
        instance("c", "{}", "f3"),
    ])
    .await;
    let lock = IndexLock::new();
    let guard = lock.write().await;
    let known = ids(&["adapter.Type.instance.b", "adapter.Type.instance.c"]);

    update_path_index(
        &store,
        &guard,
        &[instance("a", "{}", "f1"), instance("c", "{}", "f4")],
        Some(&known),
    )
    .await
    .unwrap();

    for key in stored_keys(&store).await {
        assert!(known.contains(&id(&key).top_level_parent()), "{key} survived");
    }
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.c").await,
        Some(vec!["f4".to_string()])
    );
}

#[tokio::test]
async fn test_top_level_index_holds_one_key_per_element() {
    let store = InMemoryStore::new();
    let lock = IndexLock::new();
    let guard = lock.write().await;

    update_top_level_path_index(
        &store,
        &guard,
        &[
            instance("main", r#"{"a": 1}"#, "f1"),
            instance("main", r#"{"b": 2}"#, "f2"),
        ],
        None,
    )
    .await
    .unwrap();

    assert_eq!(stored_keys(&store).await, ["adapter.Type.instance.main"]);
    assert_eq!(
        stored_paths(&store, "adapter.Type.instance.main").await,
        Some(vec!["f1".to_string(), "f2".to_string()])
    );
}

#[tokio::test]
async fn test_custom_hint_function() {
    let store = InMemoryStore::new();
    let lock = IndexLock::new();
    let guard = lock.write().await;

    update_index(
        &store,
        &guard,
        &[instance("main", "{}", "f1")],
        None,
        |elements| {
            elements
                .iter()
                .map(|element| PathHint::new(element.elem_id().full_name(), vec![path("fixed")]))
                .collect()
        },
    )
    .await
    .unwrap();

    assert_eq!(
        store.get("adapter.Type.instance.main").await.unwrap(),
        Some(vec![path("fixed")])
    );
}
