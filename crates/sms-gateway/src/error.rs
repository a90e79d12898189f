//! Error types for sms-gateway.

use thiserror::Error;

/// Errors from the SMS provider.
#[derive(Debug, Error)]
pub enum SmsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the request.
    #[error("Provider error {status}: {message}")]
    Provider { status: u16, message: String },

    /// The response could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
