//! Error types for the webhook server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use thiserror::Error;

/// Errors that turn into a 500 response.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The dispatcher hit a storage fault.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] OrchestratorError),

    /// The dispatch task panicked or was aborted.
    #[error("Dispatch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let message = match &self {
            WebhookError::Dispatch(err) => {
                tracing::error!("Dispatch error: {}", err);
                err.to_string()
            }
            WebhookError::Task(err) => {
                tracing::error!("Dispatch task failed: {}", err);
                "internal error".to_string()
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Result type for webhook handlers.
pub type Result<T> = std::result::Result<T, WebhookError>;
