use super::*;

fn temp_storage() -> (tempfile::TempDir, FileStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("store.json"));
    (dir, storage)
}

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_missing_key_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("priorities").unwrap(), None);
}

#[test]
fn memory_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set("priorities", "[]").unwrap();
    assert_eq!(storage.get("priorities").unwrap().as_deref(), Some("[]"));
}

#[test]
fn memory_set_overwrites() {
    let storage = MemoryStorage::new();
    storage.set("k", "one").unwrap();
    storage.set("k", "two").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn memory_remove_deletes_and_tolerates_missing() {
    let storage = MemoryStorage::new();
    storage.set("k", "v").unwrap();
    storage.remove("k").unwrap();
    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
}

// =============================================================
// FileStorage
// =============================================================

#[test]
fn file_missing_file_reads_as_empty() {
    let (_dir, storage) = temp_storage();
    assert_eq!(storage.get("priorities").unwrap(), None);
}

#[test]
fn file_set_then_get_survives_new_instance() {
    let (_dir, storage) = temp_storage();
    storage.set("priorities", r#"[{"id":"a"}]"#).unwrap();

    let reopened = FileStorage::new(storage.path());
    assert_eq!(reopened.get("priorities").unwrap().as_deref(), Some(r#"[{"id":"a"}]"#));
}

#[test]
fn file_keeps_other_keys() {
    let (_dir, storage) = temp_storage();
    storage.set("theme", "purple-green").unwrap();
    storage.set("priorities", "[]").unwrap();
    assert_eq!(storage.get("theme").unwrap().as_deref(), Some("purple-green"));
    assert_eq!(storage.get("priorities").unwrap().as_deref(), Some("[]"));
}

#[test]
fn file_remove_deletes_key() {
    let (_dir, storage) = temp_storage();
    storage.set("a", "1").unwrap();
    storage.set("b", "2").unwrap();
    storage.remove("a").unwrap();
    assert_eq!(storage.get("a").unwrap(), None);
    assert_eq!(storage.get("b").unwrap().as_deref(), Some("2"));
}

#[test]
fn file_empty_file_reads_as_empty() {
    let (_dir, storage) = temp_storage();
    std::fs::write(storage.path(), "").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
}

#[test]
fn file_corrupt_file_is_error() {
    let (_dir, storage) = temp_storage();
    std::fs::write(storage.path(), "[1, 2").unwrap();
    let err = storage.get("k").unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}

#[test]
fn file_leaves_no_temp_file_behind() {
    let (dir, storage) = temp_storage();
    storage.set("k", "v").unwrap();
    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["store.json"]);
}

#[test]
fn storage_is_object_safe() {
    let storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
    storage.set("k", "v").unwrap();
    assert!(storage.get("k").unwrap().is_some());
}
