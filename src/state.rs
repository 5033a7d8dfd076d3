//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! board sits behind a single async mutex: every intent, every save, and
//! every debounced resize takes the same lock, so a save never observes a
//! half-applied mutation. Resize events are not applied inline; handlers
//! push them onto a channel drained by the debounce task.

use std::sync::Arc;

use matrix::PriorityBoard;
use matrix::storage::Storage;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};

/// Canvas dimensions reported by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Shared application state. Clone is required by Axum; all fields are
/// `Arc`-wrapped or cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<PriorityBoard>>,
    pub storage: Arc<dyn Storage>,
    pub resize_tx: mpsc::Sender<CanvasSize>,
}

impl AppState {
    #[must_use]
    pub fn new(board: PriorityBoard, storage: Arc<dyn Storage>, resize_tx: mpsc::Sender<CanvasSize>) -> Self {
        Self { board: Arc::new(Mutex::new(board)), storage, resize_tx }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
