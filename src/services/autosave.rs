//! Autosave service: periodic and explicit board persistence.
//!
//! DESIGN
//! ======
//! A background task saves the board every `autosave_interval` (two minutes
//! by default). Explicit saves from the API and the final save on shutdown
//! go through the same `save_now`, which encodes and writes while holding
//! the board lock, so a save never interleaves with a mutation.
//!
//! ERROR HANDLING
//! ==============
//! A failed periodic save is logged and retried on the next tick. A store
//! that cannot be decoded at startup is copied to the backup key before the
//! board starts empty, so the first save cannot overwrite the only copy.
//!
//! Storage backends block (the file store reads and renames on disk), so
//! every storage call runs on the blocking pool. The board lock stays held
//! across that call so a save still never interleaves with a mutation.

use std::sync::Arc;
use std::time::Duration;

use matrix::BoardError;
use matrix::board::preserve_unrestorable;
use matrix::consts::STORAGE_KEY;
use matrix::error::ErrorCode;
use matrix::storage::Storage;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl ErrorCode for PersistError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Board(e) => e.error_code(),
            Self::Worker(_) => "E_STORAGE",
        }
    }
}

/// Spawn the periodic autosave task. Returns a handle for shutdown.
pub fn spawn_autosave_task(state: AppState, every: Duration) -> JoinHandle<()> {
    info!(interval_secs = every.as_secs(), "autosave configured");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; nothing has changed yet.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = save_now(&state).await {
                error!(error = %e, "autosave failed");
            }
        }
    })
}

/// Save the board to storage now. Returns the number of items written.
///
/// # Errors
///
/// Returns the board's encode or storage error, or [`PersistError::Worker`]
/// if the blocking write did not complete.
pub async fn save_now(state: &AppState) -> Result<usize, PersistError> {
    let board = state.board.lock().await;
    let raw = board.save()?;
    let count = board.len();
    with_storage(&state.storage, move |storage| Ok(storage.set(STORAGE_KEY, &raw)?)).await?;
    drop(board);
    Ok(count)
}

/// Rebuild the board from storage. Never fails: a bad store means an empty board.
pub async fn restore_on_startup(state: &AppState) -> usize {
    let mut board = state.board.lock().await;
    let raw = match with_storage(&state.storage, |storage| Ok(storage.get(STORAGE_KEY)?)).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("no saved board; starting empty");
            return 0;
        }
        Err(e) => {
            warn!(error = %e, "could not read saved board; starting empty");
            return 0;
        }
    };

    match board.restore(&raw) {
        Ok(count) => {
            info!(count, "board restored from storage");
            count
        }
        Err(e) => {
            warn!(error = %e, "could not restore board; starting empty");
            let backup = with_storage(&state.storage, move |storage| preserve_unrestorable(storage, &raw));
            if let Err(e) = backup.await {
                error!(error = %e, "could not back up unrestorable board");
            }
            0
        }
    }
}

/// Run a storage call on the blocking pool.
async fn with_storage<T, F>(storage: &Arc<dyn Storage>, op: F) -> Result<T, PersistError>
where
    T: Send + 'static,
    F: FnOnce(&dyn Storage) -> Result<T, BoardError> + Send + 'static,
{
    let storage = Arc::clone(storage);
    Ok(tokio::task::spawn_blocking(move || op(storage.as_ref())).await??)
}

#[cfg(test)]
#[path = "autosave_test.rs"]
mod tests;
