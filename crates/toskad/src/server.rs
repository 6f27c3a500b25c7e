//! HTTP server for toskad

use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use toska_common::{ChatEngine, MenuStore};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<MenuStore>,
    pub chat: ChatEngine,
    pub greeting: String,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(store: Arc<MenuStore>, chat: ChatEngine, greeting: String) -> Self {
        Self {
            store,
            chat,
            greeting,
            start_time: Instant::now(),
        }
    }
}

/// Build the full application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::chat_routes())
        .merge(routes::menu_api_routes())
        .merge(routes::health_routes())
        .merge(routes::static_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until shutdown
pub async fn run(state: AppState, addr: &str) -> Result<()> {
    let state = Arc::new(state);
    let router = app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
