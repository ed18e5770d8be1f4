use crate::common::editor_with_table;
use floorkit_designer::{InteractionState, Key, PointerEvent};

#[tokio::test]
async fn test_click_selects_table() {
    let (mut editor, table_ref) = editor_with_table().await;
    let mut selection = editor.events().selection_changed.receiver();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    assert_eq!(editor.selected_ref(), Some(table_ref.as_str()));
    assert!(editor.interaction_state().is_dragging());
    assert_eq!(selection.try_recv().ok(), Some(Some(table_ref.clone())));
    assert!(editor.scene().selection_bounds().is_some());

    editor.pointer_up(PointerEvent::at(100.0, 200.0));
    assert!(matches!(
        editor.interaction_state(),
        InteractionState::Selected { .. }
    ));
}

#[tokio::test]
async fn test_click_on_floor_clears_selection() {
    let (mut editor, _) = editor_with_table().await;
    let mut selection = editor.events().selection_changed.receiver();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_up(PointerEvent::at(100.0, 200.0));
    editor.pointer_down(PointerEvent::at(600.0, 500.0));

    assert_eq!(editor.selected_ref(), None);
    assert_eq!(editor.interaction_state(), InteractionState::Idle);
    assert!(editor.scene().selection_bounds().is_none());
    assert!(selection.try_recv().unwrap().is_some());
    assert_eq!(selection.try_recv().ok(), Some(None));
}

#[tokio::test]
async fn test_drag_moves_entry_by_delta() {
    let (mut editor, _) = editor_with_table().await;
    let mut dirty = editor.events().dirty_changed.receiver();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_move(PointerEvent::at(130.0, 190.0));
    editor.pointer_move(PointerEvent::at(150.0, 230.0));
    editor.pointer_up(PointerEvent::at(150.0, 230.0));

    let entry = &editor.schema()[0];
    assert_eq!(entry.position.x, 150.0);
    assert_eq!(entry.position.y, 230.0);
    assert_eq!(dirty.try_recv().ok(), Some(true));
    assert_eq!(dirty.try_recv().ok(), Some(true));

    // Moving without a held pointer does nothing.
    editor.pointer_move(PointerEvent::at(400.0, 400.0));
    assert_eq!(editor.schema()[0].position.x, 150.0);
}

#[tokio::test]
async fn test_drag_leaves_other_tables_in_place() {
    let (mut editor, table_ref) = editor_with_table().await;
    editor.insert(2, 500.0, 400.0).unwrap();
    editor.settle().await;
    let other = editor
        .schema()
        .iter()
        .find(|e| e.table_ref != table_ref)
        .cloned()
        .unwrap();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_move(PointerEvent::at(125.0, 215.0));
    editor.pointer_move(PointerEvent::at(140.0, 180.0));
    editor.pointer_up(PointerEvent::at(140.0, 180.0));

    let moved = editor
        .schema()
        .iter()
        .find(|e| e.table_ref == table_ref)
        .unwrap();
    assert_eq!((moved.position.x, moved.position.y), (140.0, 180.0));
    let untouched = editor
        .schema()
        .iter()
        .find(|e| e.table_ref == other.table_ref)
        .unwrap();
    assert_eq!(untouched, &other);
    assert_eq!(
        editor
            .scene()
            .table_by_ref(&other.table_ref)
            .unwrap()
            .placement
            .translation,
        floorkit_core::Point::from(other.position)
    );
}

#[tokio::test]
async fn test_drag_rotated_table_moves_by_delta() {
    let (mut editor, table_ref) = editor_with_table().await;

    editor.pointer_down(PointerEvent::at(100.0, 200.0).with_shift());
    editor.pointer_move(PointerEvent::at(130.0, 210.0));
    editor.pointer_move(PointerEvent::at(160.0, 170.0));
    editor.pointer_up(PointerEvent::at(160.0, 170.0));

    let entry = &editor.schema()[0];
    assert_eq!(entry.rotation, 45.0);
    assert_eq!((entry.position.x, entry.position.y), (160.0, 170.0));
    let node = editor.scene().table_by_ref(&table_ref).unwrap();
    assert_eq!(node.placement.rotation, 45.0);

    // The rotated table is still picked up at its new centre.
    editor.pointer_down(PointerEvent::at(160.0, 170.0));
    assert_eq!(editor.selected_ref(), Some(table_ref.as_str()));
}

#[tokio::test]
async fn test_drag_back_clears_dirty() {
    let (mut editor, _) = editor_with_table().await;
    let exported = editor.export_schema_json().unwrap();
    editor.import_floor(&exported).unwrap();
    editor.settle().await;
    assert!(!editor.is_dirty());

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_move(PointerEvent::at(120.0, 200.0));
    assert!(editor.is_dirty());
    editor.pointer_move(PointerEvent::at(100.0, 200.0));
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_shift_click_rotates() {
    let (mut editor, _) = editor_with_table().await;

    editor.pointer_down(PointerEvent::at(100.0, 200.0).with_shift());
    editor.pointer_up(PointerEvent::at(100.0, 200.0));
    assert_eq!(editor.schema()[0].rotation, 45.0);
    assert!(editor.is_dirty());

    for _ in 0..7 {
        editor.pointer_down(PointerEvent::at(100.0, 200.0).with_shift());
        editor.pointer_up(PointerEvent::at(100.0, 200.0));
    }
    assert_eq!(editor.schema()[0].rotation, 0.0);
}

#[tokio::test]
async fn test_delete_selected() {
    let (mut editor, table_ref) = editor_with_table().await;
    editor.insert(2, 500.0, 400.0).unwrap();
    editor.settle().await;
    let mut deleted = editor.events().table_deleted.receiver();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_up(PointerEvent::at(100.0, 200.0));
    editor.key_up(Key::from_name("delete"));

    assert_eq!(deleted.try_recv().ok(), Some(table_ref.clone()));
    assert_eq!(editor.schema().len(), 1);
    assert!(editor.schema().iter().all(|e| e.table_ref != table_ref));
    assert!(editor.scene().table_by_ref(&table_ref).is_none());
    assert_eq!(editor.selected_ref(), None);
}

#[tokio::test]
async fn test_delete_without_selection_is_noop() {
    let (mut editor, _) = editor_with_table().await;
    let mut deleted = editor.events().table_deleted.receiver();

    editor.key_up(Key::Delete);
    editor.key_up(Key::Other("x".into()));

    assert!(deleted.try_recv().is_err());
    assert_eq!(editor.schema().len(), 1);
}

#[tokio::test]
async fn test_redraw_drops_selection() {
    let (mut editor, _) = editor_with_table().await;
    let mut selection = editor.events().selection_changed.receiver();

    editor.pointer_down(PointerEvent::at(100.0, 200.0));
    editor.pointer_up(PointerEvent::at(100.0, 200.0));
    editor.insert(2, 600.0, 100.0).unwrap();

    assert_eq!(editor.selected_ref(), None);
    assert!(selection.try_recv().unwrap().is_some());
    assert_eq!(selection.try_recv().ok(), Some(None));
}
