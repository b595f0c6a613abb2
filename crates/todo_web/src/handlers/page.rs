//! Page controller for `GET /`.

use crate::render::{index_page, LOAD_ERROR_MESSAGE};
use crate::routes::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use log::error;
use std::sync::Arc;

/// Lists all tasks and renders them before responding.
///
/// A store failure still produces a full page: empty list, visible error
/// banner, `503 Service Unavailable`.
pub async fn index(State(state): State<Arc<AppState>>) -> (StatusCode, Html<String>) {
    match state.store.list_all().await {
        Ok(tasks) => (StatusCode::OK, Html(index_page(&tasks, None))),
        Err(err) => {
            error!(
                "event=page_render module=page status=error error_code={} error={}",
                err.code(),
                err
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(index_page(&[], Some(LOAD_ERROR_MESSAGE))),
            )
        }
    }
}
