use crate::common::editor_with_table;
use floorkit_designer::{FloorRecord, FloorStore};

#[tokio::test]
async fn test_store_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floors.json");
    let (editor, _) = editor_with_table().await;

    let mut store = FloorStore::load(&path).unwrap();
    assert!(store.list().is_empty());

    let record = FloorRecord::from_export("Terrace", &editor.export_plan()).unwrap();
    let id = record.id.clone();
    store.create(record.clone()).unwrap();
    assert!(store.create(record).is_err());

    let reopened = FloorStore::load(&path).unwrap();
    let saved = reopened.get(&id).unwrap();
    assert_eq!(saved.name, "Terrace");
    assert_eq!(saved.schema().unwrap(), editor.schema());

    let mut renamed = saved.clone();
    renamed.name = "Patio".into();
    assert!(store.update(renamed).unwrap());
    assert_eq!(FloorStore::load(&path).unwrap().get(&id).unwrap().name, "Patio");

    assert!(store.remove(&id).unwrap());
    assert!(!store.remove(&id).unwrap());
    assert!(FloorStore::load(&path).unwrap().list().is_empty());
}

#[test]
fn test_update_unknown_floor() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FloorStore::load(dir.path().join("floors.json")).unwrap();
    let record: FloorRecord = serde_json::from_str(
        r#"{"id":"ghost","name":"Ghost","plan":"","plan-data":"[]"}"#,
    )
    .unwrap();
    assert!(!store.update(record).unwrap());
    assert!(!dir.path().join("floors.json").exists());
}

#[test]
fn test_corrupt_store_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floors.json");
    std::fs::write(&path, "{ nope").unwrap();
    assert!(FloorStore::load(&path).is_err());
}
