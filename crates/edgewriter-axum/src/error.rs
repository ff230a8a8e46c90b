//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and file-serving errors to HTTP status codes and JSON
//! bodies of the form `{error, status, type?}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use edgewriter_core::domain::unsatisfied_content_range;
use edgewriter_core::CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::range_server::RangeServeError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `Range` header cannot be served. Rendered with an empty body.
    #[error("Range not satisfiable for {size} byte file")]
    RangeNotSatisfiable { size: u64 },

    /// The model could not be loaded.
    #[error("Model unavailable: {0}")]
    EngineLoad(String),

    /// The engine failed while generating.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<&'static str>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, error_type) = match self {
            Self::RangeNotSatisfiable { size } => {
                let mut response = StatusCode::RANGE_NOT_SATISFIABLE.into_response();
                if let Ok(value) = HeaderValue::from_str(&unsatisfied_content_range(size)) {
                    response.headers_mut().insert(header::CONTENT_RANGE, value);
                }
                return response;
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::EngineLoad(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                Some("ENGINE_LOAD_FAILED"),
            ),
            Self::Inference(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                Some("INFERENCE_FAILED"),
            ),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        if status.is_server_error() {
            error!(%status, error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            error_type,
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::EngineLoad(e) => Self::EngineLoad(e.to_string()),
            CoreError::Inference(e) => Self::Inference(e.to_string()),
        }
    }
}

impl From<RangeServeError> for HttpError {
    fn from(err: RangeServeError) -> Self {
        match err {
            RangeServeError::NotFound(path) => {
                Self::NotFound(format!("Asset not found: {}", path.display()))
            }
            RangeServeError::Malformed { size, .. } | RangeServeError::Unsatisfiable { size } => {
                Self::RangeNotSatisfiable { size }
            }
            RangeServeError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgewriter_core::EngineLoadError;

    #[test]
    fn test_core_error_mapping() {
        let err: HttpError = CoreError::Validation("text must not be empty".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err: HttpError =
            CoreError::EngineLoad(EngineLoadError::ModelNotFound("/m.gguf".into())).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_range_not_satisfiable_response() {
        let response = HttpError::RangeNotSatisfiable { size: 1000 }.into_response();
        assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(response.headers()[header::CONTENT_RANGE], "bytes */1000");
    }
}
