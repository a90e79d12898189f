//! Bale Bot API HTTP client.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::BaleConfig;
use crate::error::BaleError;
use crate::types::{ApiResponse, SendMessageParams, SentMessage};

/// Client for the Bale Bot API.
#[derive(Clone)]
pub struct BaleClient {
    http: Client,
    config: BaleConfig,
}

impl BaleClient {
    /// Create a client. No request is made until the first send.
    pub fn new(config: BaleConfig) -> Result<Self, BaleError> {
        if config.token.trim().is_empty() {
            return Err(BaleError::Config("bot token is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(BaleError::Http)?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, BaleError> {
        Self::new(BaleConfig::from_env()?)
    }

    /// Send a text message to a chat.
    pub async fn send_text(&self, chat_id: &str, text: &str) -> Result<SentMessage, BaleError> {
        let params = SendMessageParams { chat_id, text };

        debug!(chat_id, len = text.len(), "sendMessage");

        let response = self
            .http
            .post(self.config.send_message_url())
            .json(&params)
            .send()
            .await
            .map_err(BaleError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(BaleError::Http)?;
        let parsed: Result<ApiResponse<SentMessage>, _> = serde_json::from_str(&body);

        match parsed {
            Ok(ApiResponse {
                ok: true,
                result: Some(message),
                ..
            }) if status.is_success() => Ok(message),
            Ok(api) => {
                let description = api
                    .description
                    .unwrap_or_else(|| "request was not accepted".to_string());
                let code = api.error_code.unwrap_or(status.as_u16());
                warn!(chat_id, code, %description, "sendMessage rejected");
                Err(BaleError::Api { code, description })
            }
            Err(_) if !status.is_success() => Err(BaleError::Api {
                code: status.as_u16(),
                description: body,
            }),
            Err(e) => Err(BaleError::Json(e)),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &BaleConfig {
        &self.config
    }
}

impl std::fmt::Debug for BaleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaleClient")
            .field("config", &self.config)
            .finish()
    }
}
