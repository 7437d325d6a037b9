use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid identifier \"{0}\"")]
    InvalidId(String),
    #[error("Store connection failed: {0}")]
    Connection(String),
    #[error("Store query failed: {0}")]
    Query(String),
    #[error("Stored document is malformed: {0}")]
    Serialization(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Query(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Failures surfaced by the task API.
///
/// Store failures are split by the kind of operation that hit them: lookups
/// answer 500, mutations answer 400.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Read(StoreError),
    #[error(transparent)]
    Write(StoreError),
}

impl TaskError {
    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".to_string())
    }

    pub fn comment_not_found() -> Self {
        Self::NotFound("Comment not found".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Write(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for TaskError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for TaskError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if status.is_server_error() {
            error!("Task request failed: {message}");
        } else {
            warn!("Task request rejected ({status}): {message}");
        }
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TaskError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(TaskError::task_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            TaskError::Read(StoreError::Connection("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            TaskError::Write(StoreError::InvalidId("abc".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_error_message_passes_through() {
        let err = TaskError::Read(StoreError::InvalidId("abc".into()));
        assert_eq!(err.to_string(), "Invalid identifier \"abc\"");
    }
}
