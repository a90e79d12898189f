//! Error types for bale-client.

use thiserror::Error;

/// Errors that can occur when talking to the Bale Bot API.
#[derive(Debug, Error)]
pub enum BaleError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with `ok: false` or a non-success status.
    #[error("API error {code}: {description}")]
    Api { code: u16, description: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
