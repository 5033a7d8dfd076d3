//! Resize service — debounced canvas resizing.
//!
//! DESIGN
//! ======
//! The UI reports every intermediate size while the window is dragged. The
//! task waits for the first event, then keeps absorbing newer ones until the
//! channel stays quiet for the debounce period, and applies only the last.

use std::sync::Arc;
use std::time::Duration;

use matrix::PriorityBoard;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::state::CanvasSize;

/// Bounded capacity of the resize event channel.
pub const RESIZE_QUEUE_CAPACITY: usize = 64;

/// Spawn the resize debounce task. Exits once every sender is dropped.
pub fn spawn_resize_task(
    board: Arc<Mutex<PriorityBoard>>,
    mut rx: mpsc::Receiver<CanvasSize>,
    quiet: Duration,
) -> JoinHandle<()> {
    info!(quiet = ?quiet, "resize debounce configured");
    tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let (latest, coalesced) = settle(&mut rx, first, quiet).await;
            apply(&board, latest, coalesced).await;
        }
    })
}

/// Absorb events until `quiet` passes with none arriving, or the channel closes.
async fn settle(rx: &mut mpsc::Receiver<CanvasSize>, first: CanvasSize, quiet: Duration) -> (CanvasSize, usize) {
    let mut latest = first;
    let mut coalesced = 0;
    loop {
        match tokio::time::timeout(quiet, rx.recv()).await {
            Ok(Some(next)) => {
                latest = next;
                coalesced += 1;
            }
            Ok(None) | Err(_) => return (latest, coalesced),
        }
    }
}

async fn apply(board: &Mutex<PriorityBoard>, size: CanvasSize, coalesced: usize) {
    let mut board = board.lock().await;
    match board.resize(size.width, size.height) {
        Ok(()) => debug!(width = size.width, height = size.height, coalesced, "resize applied"),
        Err(e) => warn!(error = %e, "resize rejected"),
    }
}

#[cfg(test)]
#[path = "resize_test.rs"]
mod tests;
