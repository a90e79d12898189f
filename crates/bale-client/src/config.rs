//! Configuration types for bale-client.

use std::env;
use std::time::Duration;

use crate::error::BaleError;

/// Default Bot API base URL.
pub const DEFAULT_API_URL: &str = "https://tapi.bale.ai";

/// Configuration for talking to the Bale Bot API.
#[derive(Clone)]
pub struct BaleConfig {
    /// Base URL of the Bot API (e.g., "https://tapi.bale.ai").
    pub base_url: String,
    /// Bot token issued by the platform.
    pub token: String,
    /// Outbound request timeout.
    pub timeout: Duration,
}

impl BaleConfig {
    /// Create a new configuration for the default API host.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create configuration from environment variables.
    ///
    /// - `BALE_BOT_TOKEN` (required)
    /// - `BALE_API_URL` (default: `https://tapi.bale.ai`)
    pub fn from_env() -> Result<Self, BaleError> {
        let token = env::var("BALE_BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| BaleError::Config("BALE_BOT_TOKEN is not set".to_string()))?;

        let mut config = Self::new(token);
        if let Ok(url) = env::var("BALE_API_URL") {
            config.base_url = url;
        }
        Ok(config)
    }

    /// Get the sendMessage endpoint URL.
    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.base_url.trim_end_matches('/'),
            self.token
        )
    }
}

// The token is a credential; keep it out of logs.
impl std::fmt::Debug for BaleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaleConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
