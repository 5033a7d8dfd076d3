//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The UI layer owns drawing and drag gestures. It reports intents (add,
//! move, rename, remove, resize, save) to these endpoints and reads back
//! the item list, the ranked list, and the axis geometry to render.

pub mod items;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/items", get(items::list_items).post(items::create_item))
        .route(
            "/api/items/{id}",
            get(items::get_item)
                .patch(items::rename_item)
                .delete(items::delete_item),
        )
        .route("/api/items/{id}/position", put(items::move_item))
        .route("/api/ranked", get(items::ranked))
        .route("/api/axes", get(items::axes))
        .route("/api/resize", post(items::resize))
        .route("/api/save", post(items::save))
        .route("/api/settings", get(items::get_settings).patch(items::patch_settings))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
