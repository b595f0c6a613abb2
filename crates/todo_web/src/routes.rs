//! Router assembly and server loop.

use crate::config::ServerConfig;
use crate::handlers::{api, page};
use crate::middleware::access_log;
use crate::store::TaskStore;
use axum::routing::get;
use axum::Router;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const API_TODO_PATH: &str = "/api/todo";

/// Shared per-process state handed to every handler.
pub struct AppState {
    pub store: TaskStore,
}

/// Builds the application router over `store`.
pub fn build_router(store: TaskStore) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/", get(page::index))
        .route(API_TODO_PATH, get(api::list_todos).post(api::create_todo))
        .route("/health", get(api::health))
        .layer(axum::middleware::from_fn(access_log))
        .with_state(state)
}

/// Binds `config.bind_addr` and serves until `shutdown` resolves.
pub async fn serve(
    config: &ServerConfig,
    store: TaskStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=web status=ok addr={} db_path={}",
        listener.local_addr()?,
        config.db_path.display()
    );

    axum::serve(listener, build_router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_stop module=web status=ok");
    Ok(())
}
