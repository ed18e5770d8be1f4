use crate::common::editor;
use async_trait::async_trait;
use floorkit_core::Point;
use floorkit_designer::{
    AssetError, AssetLoader, EmbeddedAssetLoader, FloorEditor, FsAssetLoader, Node, PointerEvent,
    Surface,
};
use floorkit_settings::EditorConfig;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Holds every load until a permit is released.
struct GatedLoader {
    inner: EmbeddedAssetLoader,
    gate: Arc<Semaphore>,
}

#[async_trait]
impl AssetLoader for GatedLoader {
    async fn load(&self, source: &str) -> Result<Node, AssetError> {
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| AssetError::Aborted(e.to_string()))?;
        self.inner.load(source).await
    }
}

#[tokio::test]
async fn test_render_completes_before_drawings_arrive() {
    let mut editor = editor();
    let receipt = editor.insert(6, 300.0, 300.0).unwrap();

    assert_eq!(receipt.schema.len(), 1);
    assert_eq!(editor.scene().table_count(), 0);
    let export = editor.export_plan();
    assert_eq!(export.schema.len(), 1);
    assert!(!export.plan.contains("table-item-"));

    assert_eq!(editor.settle().await, 1);
    assert_eq!(editor.scene().table_count(), 1);
    assert!(editor.export_plan().plan.contains("table-item-"));
}

#[tokio::test]
async fn test_superseded_render_is_discarded() {
    let mut editor = editor();
    editor.insert(2, 100.0, 100.0).unwrap();
    editor.insert(4, 300.0, 100.0).unwrap();
    editor.insert(6, 500.0, 100.0).unwrap();
    assert_eq!(editor.pending_loads(), 6);

    assert_eq!(editor.settle().await, 3);
    assert_eq!(editor.scene().table_count(), 3);
    assert_eq!(editor.pending_loads(), 0);
}

#[tokio::test]
async fn test_unresolved_load_keeps_schema() {
    let gate = Arc::new(Semaphore::new(0));
    let loader = GatedLoader {
        inner: EmbeddedAssetLoader::builtin(),
        gate: gate.clone(),
    };
    let mut editor = FloorEditor::new(
        Surface::new(800.0, 600.0),
        EditorConfig::default(),
        Arc::new(loader),
    )
    .unwrap();

    editor.insert(4, 100.0, 100.0).unwrap();
    tokio::task::yield_now().await;
    assert_eq!(editor.process_loaded_assets(), 0);
    assert_eq!(editor.scene().table_count(), 0);
    assert_eq!(editor.export_plan().schema.len(), 1);

    gate.add_permits(1);
    assert_eq!(editor.settle().await, 1);
    assert_eq!(editor.scene().table_count(), 1);
}

#[tokio::test]
async fn test_missing_drawing_skips_entry() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = FloorEditor::new(
        Surface::new(800.0, 600.0),
        EditorConfig::default(),
        Arc::new(FsAssetLoader::new(dir.path())),
    )
    .unwrap();

    editor.insert(2, 100.0, 100.0).unwrap();
    assert_eq!(editor.settle().await, 0);
    assert_eq!(editor.scene().table_count(), 0);
    assert_eq!(editor.schema().len(), 1);
}

#[tokio::test]
async fn test_unregistered_seat_counts_stay_in_schema() {
    let mut editor = editor();
    editor
        .import_floor(
            r#"[
                {"id":"a","ref":"A1","chairs":4,"position":{"x":100,"y":100},"rotation":0},
                {"id":"b","ref":"B1","chairs":8,"position":{"x":300,"y":100},"rotation":90}
            ]"#,
        )
        .unwrap();
    editor.settle().await;

    assert_eq!(editor.scene().table_count(), 1);
    assert!(editor.scene().table_by_ref("B1").is_none());
    let export = editor.export_plan();
    assert_eq!(export.schema.len(), 2);
    assert!(!export.plan.contains("table-item-B1"));
}

#[tokio::test]
async fn test_round_table_drawn_with_arcs() {
    let loader = EmbeddedAssetLoader::builtin().with_source(
        "tables/table-2.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="80" height="80">
            <path d="M 0 40 A 40 40 0 0 1 80 40 A 40 40 0 0 1 0 40 Z" fill="#FFFFFF"/>
        </svg>"##,
    );
    let mut editor = FloorEditor::new(
        Surface::new(800.0, 600.0),
        EditorConfig::default(),
        Arc::new(loader),
    )
    .unwrap();
    editor.insert(2, 200.0, 200.0).unwrap();
    editor.settle().await;
    let table_ref = editor.schema()[0].table_ref.clone();

    let table = editor.scene().table_by_ref(&table_ref).unwrap();
    let drawing = table.children()[0].bounds_in_parent().unwrap();
    assert!((drawing.width() - 80.0).abs() < 0.5);
    assert!((drawing.height() - 80.0).abs() < 0.5);
    assert!(drawing.center().distance_to(&Point::default()) < 0.5);

    editor.pointer_down(PointerEvent::at(200.0, 175.0));
    assert_eq!(editor.selected_ref(), Some(table_ref.as_str()));
    editor.pointer_up(PointerEvent::at(200.0, 175.0));

    // Inside the bounding box but outside the disc.
    editor.pointer_down(PointerEvent::at(165.0, 165.0));
    assert_eq!(editor.selected_ref(), None);
}
