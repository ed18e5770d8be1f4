use crate::common::{editor, editor_with_table};
use floorkit_designer::{EditorError, PointerEvent};

#[tokio::test]
async fn test_export_import_roundtrip() {
    let mut editor = editor();
    editor.insert(2, 100.0, 100.0).unwrap();
    editor.insert(4, 300.0, 250.5).unwrap();
    editor.insert(6, 550.0, 400.0).unwrap();
    editor.settle().await;
    editor.pointer_down(PointerEvent::at(300.0, 250.5).with_shift());
    editor.pointer_up(PointerEvent::at(300.0, 250.5));

    let export = editor.export_plan();
    let serialized = serde_json::to_string(&export.schema).unwrap();

    let mut other = crate::common::editor();
    let imported = other.import_floor(&serialized).unwrap().to_vec();
    assert_eq!(imported, export.schema);
    assert!(!other.is_dirty());

    other.settle().await;
    assert_eq!(other.scene().table_count(), 3);
    assert_eq!(other.export_plan().schema, export.schema);
}

#[tokio::test]
async fn test_exported_markup() {
    let (editor, table_ref) = editor_with_table().await;
    let plan = editor.export_plan().plan;

    let style_at = plan.find("<style").unwrap();
    let bg_at = plan.find(r#"id="bg""#).unwrap();
    let tables_at = plan.find(r#"id="floor-plan""#).unwrap();
    assert!(style_at < bg_at && bg_at < tables_at);

    assert!(plan.contains(&format!(r#"id="table-item-{table_ref}""#)));
    assert!(plan.contains(r#"class="table-item""#));
    assert!(plan.contains(&format!(r#"id="id-wrapper-{table_ref}""#)));
    assert!(plan.contains(r#"class="id-wrapper""#));
    assert!(plan.contains(".id-wrapper.dine-in"));
    assert!(plan.contains(".id-wrapper.reserved"));
    assert!(plan.contains(r#"data-chairs="4""#));
    let label_at = plan.find(&format!(r#"id="table-id-{table_ref}""#)).unwrap();
    assert!(plan[label_at..].contains(table_ref.as_str()));
    assert!(plan.contains(r#"text-anchor="middle""#));
}

#[tokio::test]
async fn test_import_resets_dirty_baseline() {
    let (mut editor, _) = editor_with_table().await;
    assert!(editor.is_dirty());

    let serialized = editor.export_schema_json().unwrap();
    editor.import_floor(&serialized).unwrap();
    assert!(!editor.is_dirty());

    editor.insert(2, 500.0, 500.0).unwrap();
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn test_malformed_import_clears_editor() {
    let (mut editor, _) = editor_with_table().await;
    let serialized = editor.export_schema_json().unwrap();
    editor.import_floor(&serialized).unwrap();
    editor.settle().await;

    let err = editor.import_floor("{not json").unwrap_err();
    assert!(matches!(err, EditorError::InvalidSchema(_)));
    assert!(editor.schema().is_empty());
    assert_eq!(editor.scene().table_count(), 0);
    // The baseline from the last good import survives.
    assert!(editor.is_dirty());

    editor.settle().await;
    assert_eq!(editor.scene().table_count(), 0);
}

#[tokio::test]
async fn test_reimport_replaces_tables() {
    let mut editor = editor();
    editor
        .import_floor(r#"[{"id":"a","ref":"A1","chairs":2,"position":{"x":100,"y":100},"rotation":0}]"#)
        .unwrap();
    editor
        .import_floor(r#"[{"id":"b","ref":"B1","chairs":4,"position":{"x":300,"y":300},"rotation":45}]"#)
        .unwrap();
    editor.settle().await;

    assert_eq!(editor.scene().table_count(), 1);
    assert!(editor.scene().table_by_ref("B1").is_some());
    assert!(editor.scene().table_by_ref("A1").is_none());
    let bg = editor
        .scene()
        .layer(floorkit_designer::LayerKind::Background)
        .unwrap();
    assert_eq!(bg.len(), 23);
}
