//! HTTP error mapping.
//!
//! # Responsibility
//! - Translate repository errors into status codes and JSON error bodies.
//!
//! # Invariants
//! - `StoreUnavailable` always maps to `503 Service Unavailable`.
//! - Error bodies are `{ "error": <message>, "code": <stable code> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use std::fmt::{Display, Formatter};
use todo_core::RepoError;

/// Error returned by JSON API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    /// Request was malformed before reaching the store.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "bad_request",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        let status = match &value {
            RepoError::Validation(_) => StatusCode::BAD_REQUEST,
            RepoError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RepoError::InvalidData(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: value.code(),
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                "event=api_error module=api status=error http_status={} error_code={} error={}",
                self.status.as_u16(),
                self.code,
                self.message
            );
        } else {
            warn!(
                "event=api_error module=api status=rejected http_status={} error_code={}",
                self.status.as_u16(),
                self.code
            );
        }

        let body = Json(json!({ "error": self.message, "code": self.code }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use todo_core::db::DbError;
    use todo_core::{RepoError, TaskValidationError};

    #[test]
    fn repo_errors_map_to_expected_statuses() {
        let validation = ApiError::from(RepoError::Validation(
            TaskValidationError::EmptyDescription,
        ));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.code(), "validation_failed");

        let unavailable = ApiError::from(RepoError::StoreUnavailable(DbError::Unreachable(
            "gone".to_string(),
        )));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unavailable.code(), "store_unavailable");

        let invalid = ApiError::from(RepoError::InvalidData("bad row".to_string()));
        assert_eq!(invalid.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
