use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Gateway-specific error types, one per response class.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Upstream unavailable during {stage} stage: {reason}")]
    UpstreamUnavailable { stage: &'static str, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            GatewayError::Validation(reason) => {
                (StatusCode::BAD_REQUEST, format!("Invalid input: {}", reason))
            }
            GatewayError::UpstreamUnavailable { stage, reason } => {
                error!(stage, reason = %reason, "Upstream unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Service unavailable: {} stage failed ({})", stage, reason),
                )
            }
            GatewayError::Internal(msg) => {
                error!(error = %msg, "Internal gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// Define a Result type alias for handler functions
pub type GatewayResult<T> = Result<T, GatewayError>;
