//! Types for sending messages via the Bot API.

use serde::{Deserialize, Serialize};

/// Parameters for `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams<'a> {
    /// Target chat.
    pub chat_id: &'a str,
    /// Message text.
    pub text: &'a str,
}

/// Envelope wrapped around every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Payload when `ok` is true.
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    /// Numeric error code when `ok` is false.
    #[serde(default)]
    pub error_code: Option<u16>,
    /// Human-readable error when `ok` is false.
    #[serde(default)]
    pub description: Option<String>,
}

/// The message object returned by `sendMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    /// Message ID within the chat.
    pub message_id: i64,
    /// Unix timestamp.
    #[serde(default)]
    pub date: Option<i64>,
}
