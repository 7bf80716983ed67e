use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use palate_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Server-specific error types.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Index is not ready to serve queries")]
    IndexNotReady,

    #[error("Core index error: {0}")]
    CoreError(#[from] CoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert errors into HTTP responses with a JSON error body.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ServerError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, format!("Bad request: {}", reason))
            }
            ServerError::IndexNotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Index is not loaded yet; try again shortly".to_string(),
            ),
            ServerError::CoreError(core_err) => match core_err {
                CoreError::DimensionMismatch { expected, actual } => (
                    StatusCode::BAD_REQUEST,
                    format!("Dimension mismatch: expected {}, got {}", expected, actual),
                ),
                CoreError::InvalidArgument(msg) | CoreError::Configuration(msg) => {
                    (StatusCode::BAD_REQUEST, format!("Invalid argument: {}", msg))
                }
                CoreError::IoError { path, source } => {
                    error!(path=?path, error=%source, "Core I/O error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error (I/O)".to_string(),
                    )
                }
                CoreError::Deserialization(msg) => {
                    error!(error=%msg, "Core deserialization error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error (deserialization)".to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    error!(error=%msg, "Core internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ServerError::Internal(msg) => {
                error!(error=%msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        if status.is_server_error() {
            error!("Responding with status {}: {}", status, error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// Define a Result type alias for handler functions
pub type ServerResult<T> = Result<T, ServerError>;
