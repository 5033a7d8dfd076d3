//! Board intent routes: items, ranking, axes, resize, save, settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use matrix::board::Placement;
use matrix::error::ErrorCode;
use matrix::settings::{Settings, SettingsPatch};
use matrix::{AxisGeometry, BoardError, Classification, Position, PriorityItem, RankedEntry};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::services::autosave::{self, PersistError};
use crate::state::{AppState, CanvasSize};

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("resize queue is closed")]
    ResizeQueueClosed,
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Board(e) => e.error_code(),
            Self::Persist(e) => e.error_code(),
            Self::ResizeQueueClosed => "E_RESIZE_UNAVAILABLE",
        }
    }
}

pub fn board_error_to_status(err: &BoardError) -> StatusCode {
    match err {
        BoardError::Validation(_) => StatusCode::BAD_REQUEST,
        BoardError::NotFound(_) => StatusCode::NOT_FOUND,
        BoardError::DuplicateId(_) => StatusCode::CONFLICT,
        BoardError::Malformed(_) | BoardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Board(e) | Self::Persist(PersistError::Board(e)) => board_error_to_status(e),
            Self::Persist(PersistError::Worker(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResizeQueueClosed => StatusCode::SERVICE_UNAVAILABLE,
        };
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorBody { error: self.error_code(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

// =============================================================================
// BODIES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub title: String,
    #[serde(flatten)]
    pub placement: Placement,
}

#[derive(Debug, Deserialize)]
pub struct RenameItemBody {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RankedResponse {
    /// Item ids in ranked order.
    pub order: Vec<String>,
    /// One row per item, in ranked order.
    pub entries: Vec<RankedEntry>,
    pub quadrants: Classification,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub saved: usize,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/items` — items in insertion order.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<PriorityItem>> {
    Json(state.board.lock().await.items().to_vec())
}

/// `GET /api/items/{id}` — a single item.
pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<PriorityItem>, ApiError> {
    let board = state.board.lock().await;
    let item = board.item(&id).cloned().ok_or(BoardError::NotFound(id))?;
    Ok(Json(item))
}

/// `POST /api/items` — add an item.
pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<CreateItemBody>,
) -> Result<(StatusCode, Json<PriorityItem>), ApiError> {
    let item = state
        .board
        .lock()
        .await
        .add_item(&body.title, body.placement)?;
    info!(id = %item.id, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PATCH /api/items/{id}` — rename an item.
pub async fn rename_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenameItemBody>,
) -> Result<Json<PriorityItem>, ApiError> {
    let item = state.board.lock().await.rename_item(&id, &body.title)?;
    Ok(Json(item))
}

/// `PUT /api/items/{id}/position` — drag end: move an item.
pub async fn move_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(position): Json<Position>,
) -> Result<Json<PriorityItem>, ApiError> {
    let item = state.board.lock().await.move_item(&id, position)?;
    Ok(Json(item))
}

/// `DELETE /api/items/{id}` — remove an item.
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.board.lock().await.remove_item(&id)?;
    info!(%id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/ranked` — ranked list grouped by quadrant.
pub async fn ranked(State(state): State<AppState>) -> Json<RankedResponse> {
    let board = state.board.lock().await;
    Json(RankedResponse {
        order: board.ranked_order(),
        entries: board.ranked_entries(),
        quadrants: board.classification().clone(),
    })
}

/// `GET /api/axes` — axis lines and labels for the current canvas.
pub async fn axes(State(state): State<AppState>) -> Json<AxisGeometry> {
    Json(state.board.lock().await.axis_geometry().clone())
}

/// `POST /api/resize` — queue a debounced canvas resize.
pub async fn resize(State(state): State<AppState>, Json(size): Json<CanvasSize>) -> Result<StatusCode, ApiError> {
    let valid = size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0;
    if !valid {
        return Err(BoardError::Validation(format!("canvas must be positive, got {}x{}", size.width, size.height)).into());
    }
    state
        .resize_tx
        .send(size)
        .await
        .map_err(|_| ApiError::ResizeQueueClosed)?;
    Ok(StatusCode::ACCEPTED)
}

/// `POST /api/save` — save the board now.
pub async fn save(State(state): State<AppState>) -> Result<Json<SaveResponse>, ApiError> {
    let saved = autosave::save_now(&state).await?;
    info!(saved, "board saved on request");
    Ok(Json(SaveResponse { saved }))
}

/// `GET /api/settings` — current display settings.
pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.board.lock().await.settings())
}

/// `PATCH /api/settings` — update display settings.
pub async fn patch_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<Settings>, ApiError> {
    let mut board = state.board.lock().await;
    board.update_settings(patch)?;
    Ok(Json(board.settings()))
}

#[cfg(test)]
#[path = "items_test.rs"]
mod tests;
