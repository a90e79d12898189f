//! Provider response types.

use serde::Deserialize;

/// Envelope returned by every endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupResponse {
    /// Call status.
    #[serde(rename = "return")]
    pub status: ReturnStatus,
    /// Per-message results; absent or null on failure.
    #[serde(default)]
    pub entries: Option<Vec<LookupEntry>>,
}

/// Status block of a response.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnStatus {
    /// 200 on success, provider error code otherwise.
    pub status: u16,
    /// Provider message.
    #[serde(default)]
    pub message: String,
}

/// A queued message.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupEntry {
    #[serde(rename = "messageid")]
    pub message_id: i64,
    #[serde(default)]
    pub receptor: String,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default, rename = "statustext")]
    pub status_text: Option<String>,
    #[serde(default)]
    pub cost: Option<i64>,
}

impl LookupResponse {
    /// Whether the provider accepted the request.
    pub fn is_success(&self) -> bool {
        self.status.status == 200
    }
}
