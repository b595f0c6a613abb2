//! Request access logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use log::info;
use std::time::Instant;

/// Logs method, path, status and latency for every request.
pub async fn access_log(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=web status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
