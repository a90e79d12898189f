//! Error types for orchestrator operations.

use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur while handling a message.
///
/// Only storage faults escape [`crate::Dispatcher::dispatch`]; delivery
/// failures are logged and turned into user-facing replies.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Storage failed.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Message sending failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// One-time code delivery failed.
    #[error("code delivery failed: {0}")]
    OtpDelivery(String),

    /// Invalid setup, such as a missing code secret.
    #[error("configuration error: {0}")]
    Configuration(String),
}
