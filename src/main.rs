mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use matrix::PriorityBoard;
use matrix::storage::FileStorage;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::services::resize::RESIZE_QUEUE_CAPACITY;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "configuration loaded");

    let board = PriorityBoard::new(config.canvas_width, config.canvas_height).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid canvas size; using defaults");
        PriorityBoard::default()
    });
    let storage = Arc::new(FileStorage::new(&config.storage_path));
    let (resize_tx, resize_rx) = mpsc::channel(RESIZE_QUEUE_CAPACITY);
    let state = state::AppState::new(board, storage, resize_tx);

    services::autosave::restore_on_startup(&state).await;

    let autosave = services::autosave::spawn_autosave_task(state.clone(), config.autosave_interval);
    let resize =
        services::resize::spawn_resize_task(Arc::clone(&state.board), resize_rx, config.resize_debounce);

    let app = routes::app(state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!(port = config.port, path = %config.storage_path.display(), "neo-strategy listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    autosave.abort();
    resize.abort();
    match services::autosave::save_now(&state).await {
        Ok(saved) => tracing::info!(saved, "final save complete"),
        Err(e) => tracing::error!(error = %e, "final save failed"),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
