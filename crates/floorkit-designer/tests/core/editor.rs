use crate::common::{editor, editor_with_table};
use floorkit_designer::{EditorError, EmbeddedAssetLoader, FloorEditor, NodeKind, Surface};
use floorkit_settings::EditorConfig;
use std::sync::Arc;

#[tokio::test]
async fn test_insert_on_empty_floor() {
    let mut editor = editor();
    let mut dirty = editor.events().dirty_changed.receiver();

    let receipt = editor.insert(4, 100.0, 200.0).unwrap();
    assert_eq!(receipt.requested, 1);

    let schema = editor.schema();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema[0].chairs, 4);
    assert_eq!(schema[0].position.x, 100.0);
    assert_eq!(schema[0].position.y, 200.0);
    assert_eq!(schema[0].rotation, 0.0);
    let r = schema[0].table_ref.as_bytes();
    assert!(r.len() == 2 && r[0].is_ascii_uppercase() && r[1].is_ascii_digit());

    assert_eq!(dirty.try_recv().ok(), Some(true));
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn test_insert_unsupported_seat_count() {
    let mut editor = editor();
    let mut dirty = editor.events().dirty_changed.receiver();

    assert!(editor.insert(3, 0.0, 0.0).is_none());
    assert!(editor.schema().is_empty());
    assert!(dirty.try_recv().is_err());
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_inserted_refs_are_unique() {
    let mut editor = editor();
    for i in 0..30 {
        editor.insert(2, i as f64 * 10.0, 0.0).unwrap();
    }
    let mut refs: Vec<_> = editor.schema().iter().map(|e| e.table_ref.clone()).collect();
    refs.sort();
    refs.dedup();
    assert_eq!(refs.len(), 30);
}

#[tokio::test]
async fn test_table_node_structure() {
    let (editor, table_ref) = editor_with_table().await;
    let node = editor.scene().table_by_ref(&table_ref).unwrap();

    assert_eq!(node.name.as_deref(), Some(format!("table-item-{table_ref}").as_str()));
    let meta = node.table.as_ref().unwrap();
    assert_eq!(meta.chairs, 4);
    assert_eq!(meta.entry_id, editor.schema()[0].id);

    let children = node.children();
    assert!(children[0].is_group());
    assert_eq!(children[1].name.as_deref(), Some(format!("id-wrapper-{table_ref}").as_str()));
    match &children[2].kind {
        NodeKind::Text(span) => assert_eq!(span.content, table_ref),
        other => panic!("expected label, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rename_ref() {
    let (mut editor, old) = editor_with_table().await;
    let mut dirty = editor.events().dirty_changed.receiver();

    assert!(editor.rename_ref(&old, "Z9"));
    assert_eq!(editor.schema()[0].table_ref, "Z9");
    assert_eq!(dirty.try_recv().ok(), Some(true));

    editor.settle().await;
    assert!(editor.scene().table_by_ref("Z9").is_some());
    assert!(editor.scene().table_by_ref(&old).is_none());
}

#[tokio::test]
async fn test_rename_rejections() {
    let mut editor = editor();
    editor.insert(2, 0.0, 0.0).unwrap();
    editor.insert(2, 50.0, 0.0).unwrap();
    let first = editor.schema()[0].table_ref.clone();
    let second = editor.schema()[1].table_ref.clone();

    assert!(!editor.rename_ref("nope", "Q1"));
    assert!(!editor.rename_ref(&first, ""));
    assert!(!editor.rename_ref(&first, &second));
    assert_eq!(editor.schema()[0].table_ref, first);
}

#[tokio::test]
async fn test_rename_and_back_restores_schema() {
    let (mut editor, original) = editor_with_table().await;
    let before = editor.schema().to_vec();
    let badge_before = badge_width(&editor, &original);

    assert!(editor.rename_ref(&original, "W12"));
    editor.settle().await;
    assert!(badge_width(&editor, "W12") > badge_before);

    assert!(editor.rename_ref("W12", &original));
    editor.settle().await;
    assert_eq!(editor.schema(), before.as_slice());
    assert_eq!(badge_width(&editor, &original), badge_before);
}

fn badge_width(editor: &FloorEditor, table_ref: &str) -> f64 {
    let node = editor.scene().table_by_ref(table_ref).unwrap();
    match &node.children()[1].kind {
        NodeKind::Rect { bounds, .. } => bounds.width(),
        other => panic!("expected badge, got {other:?}"),
    }
}

#[test]
fn test_requires_runtime() {
    let err = FloorEditor::new(
        Surface::new(100.0, 100.0),
        EditorConfig::default(),
        Arc::new(EmbeddedAssetLoader::builtin()),
    )
    .unwrap_err();
    assert!(matches!(err, EditorError::NoRuntime));
}

#[tokio::test]
async fn test_rejects_invalid_config() {
    let mut config = EditorConfig::default();
    config.interaction.hit_tolerance = -1.0;
    let err = FloorEditor::new(
        Surface::new(100.0, 100.0),
        config,
        Arc::new(EmbeddedAssetLoader::builtin()),
    )
    .unwrap_err();
    assert!(matches!(err, EditorError::Config(_)));
}
