#![allow(dead_code)]

use floorkit_designer::{EmbeddedAssetLoader, FloorEditor, RefGenerator, Surface};
use floorkit_settings::EditorConfig;
use std::sync::Arc;

pub fn editor() -> FloorEditor {
    FloorEditor::new(
        Surface::new(800.0, 600.0),
        EditorConfig::default(),
        Arc::new(EmbeddedAssetLoader::builtin()),
    )
    .unwrap()
    .with_ref_generator(RefGenerator::seeded(11))
}

/// Editor with one settled 4-seat table at (100, 200). Returns its ref.
pub async fn editor_with_table() -> (FloorEditor, String) {
    let mut editor = editor();
    editor.insert(4, 100.0, 200.0).unwrap();
    editor.settle().await;
    let table_ref = editor.schema()[0].table_ref.clone();
    (editor, table_ref)
}
