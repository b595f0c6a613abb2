//! JSON task API.

use crate::error::ApiError;
use crate::routes::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::info;
use serde_json::{json, Value};
use std::sync::Arc;
use todo_core::Task;

/// `POST /api/todo`: body is a bare JSON string holding the description.
///
/// The body is decoded regardless of `Content-Type`; browsers send a
/// stringified value as `text/plain`.
pub async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let description: String = serde_json::from_slice(&body).map_err(|err| {
        ApiError::bad_request(format!("request body must be a JSON string: {err}"))
    })?;

    let task = state.store.create(description).await?;
    info!(
        "event=task_create module=api status=ok task_id={} description_chars={}",
        task.id,
        task.description.chars().count()
    );
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/todo`: every task in insertion order.
pub async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list_all().await?;
    Ok(Json(tasks))
}

/// `GET /health`: liveness plus a store round-trip.
///
/// `last_created_at_ms` is `null` on an empty store.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let stats = state.store.stats().await?;
    Ok(Json(json!({
        "status": "ok",
        "version": todo_core::core_version(),
        "tasks": stats.count,
        "last_created_at_ms": stats.last_created_at_ms,
    })))
}
