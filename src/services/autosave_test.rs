use std::sync::Arc;

use matrix::board::Placement;
use matrix::consts::{STORAGE_BACKUP_KEY, STORAGE_KEY};
use matrix::storage::{FileStorage, Storage};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

use super::*;
use crate::state::test_helpers;

#[tokio::test]
async fn save_now_writes_current_items() {
    let (state, _rx) = test_helpers::test_app_state();
    state
        .board
        .lock()
        .await
        .add_item("Ship", Placement::default())
        .unwrap();

    assert_eq!(save_now(&state).await.unwrap(), 1);
    let raw = state.storage.get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"Ship\""));
}

#[tokio::test]
async fn restore_on_startup_loads_saved_items() {
    let (state, _rx) = test_helpers::test_app_state();
    state
        .storage
        .set(STORAGE_KEY, r#"[{"id":"abc","title":"Hire","position":{"x":10,"y":20}}]"#)
        .unwrap();

    assert_eq!(restore_on_startup(&state).await, 1);
    assert_eq!(state.board.lock().await.item("abc").unwrap().title, "Hire");
}

#[tokio::test]
async fn restore_on_startup_with_malformed_store_starts_empty() {
    let (state, _rx) = test_helpers::test_app_state();
    state.storage.set(STORAGE_KEY, "[{oops").unwrap();

    assert_eq!(restore_on_startup(&state).await, 0);
    assert!(state.board.lock().await.is_empty());
}

#[tokio::test]
async fn unrestorable_document_survives_the_next_save() {
    let (state, _rx) = test_helpers::test_app_state();
    let raw = r#"[{"id":"a","title":"Keep","position":{"x":1}}]"#;
    state.storage.set(STORAGE_KEY, raw).unwrap();

    assert_eq!(restore_on_startup(&state).await, 0);
    assert_eq!(save_now(&state).await.unwrap(), 0);

    assert_eq!(state.storage.get(STORAGE_BACKUP_KEY).unwrap().as_deref(), Some(raw));
    assert_eq!(state.storage.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn restored_document_is_not_backed_up() {
    let (state, _rx) = test_helpers::test_app_state();
    state
        .storage
        .set(STORAGE_KEY, r#"[{"id":"abc","title":"Hire","position":{"x":10,"y":20}}]"#)
        .unwrap();

    assert_eq!(restore_on_startup(&state).await, 1);
    assert!(state.storage.get(STORAGE_BACKUP_KEY).unwrap().is_none());
}

#[tokio::test]
async fn save_now_surfaces_storage_failure() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, _rx) = mpsc::channel(1);
    // A directory cannot be read as the store file.
    let state = AppState::new(
        matrix::PriorityBoard::default(),
        Arc::new(FileStorage::new(dir.path())),
        tx,
    );

    let err = save_now(&state).await.unwrap_err();
    assert!(matches!(err, PersistError::Board(BoardError::Storage(_))));
    assert_eq!(err.error_code(), "E_STORAGE");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_file_saves_all_complete() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, _rx) = mpsc::channel(1);
    let state = AppState::new(
        matrix::PriorityBoard::default(),
        Arc::new(FileStorage::new(dir.path().join("board.json"))),
        tx,
    );
    state
        .board
        .lock()
        .await
        .add_item("Disk", Placement::default())
        .unwrap();

    let saves: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move { save_now(&state).await })
        })
        .collect();
    for save in saves {
        assert_eq!(save.await.unwrap().unwrap(), 1);
    }
    assert!(state.storage.get(STORAGE_KEY).unwrap().unwrap().contains("\"Disk\""));
}

#[tokio::test]
async fn restore_on_startup_with_no_store_starts_empty() {
    let (state, _rx) = test_helpers::test_app_state();
    assert_eq!(restore_on_startup(&state).await, 0);
}

#[tokio::test]
async fn autosave_task_saves_on_interval() {
    let (state, _rx) = test_helpers::test_app_state();
    state
        .board
        .lock()
        .await
        .add_item("Tick", Placement::default())
        .unwrap();

    let handle = spawn_autosave_task(state.clone(), Duration::from_millis(20));
    sleep(Duration::from_millis(150)).await;
    handle.abort();

    let raw = state.storage.get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"Tick\""));
}

#[tokio::test]
async fn autosave_task_does_not_save_immediately() {
    let (state, _rx) = test_helpers::test_app_state();
    let handle = spawn_autosave_task(state.clone(), Duration::from_secs(60));
    sleep(Duration::from_millis(50)).await;
    handle.abort();
    assert!(state.storage.get(STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn file_backed_round_trip_across_states() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    let (tx, _rx) = mpsc::channel(1);
    let first = AppState::new(
        matrix::PriorityBoard::new(500.0, 500.0).unwrap(),
        Arc::new(FileStorage::new(&path)),
        tx,
    );
    let id = first
        .board
        .lock()
        .await
        .add_item("Persist", Placement::default())
        .unwrap()
        .id;
    save_now(&first).await.unwrap();

    let (tx, _rx) = mpsc::channel(1);
    let second = AppState::new(
        matrix::PriorityBoard::new(500.0, 500.0).unwrap(),
        Arc::new(FileStorage::new(&path)),
        tx,
    );
    assert_eq!(restore_on_startup(&second).await, 1);
    assert_eq!(second.board.lock().await.item(&id).unwrap().title, "Persist");
}
