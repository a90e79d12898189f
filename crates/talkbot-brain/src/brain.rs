//! TalkbotBrain implementation.

use brain_core::{async_trait, Brain, BrainError, Completion, CompletionRequest, NO_RESPONSE_TEXT};
use reqwest::Client;
use tracing::{debug, warn};

use crate::api_types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::TalkbotConfig;

/// A brain that calls an OpenAI-compatible chat completions endpoint.
///
/// Stateless: conversation history is assembled by the caller and sent with
/// every request.
pub struct TalkbotBrain {
    client: Client,
    config: TalkbotConfig,
}

impl TalkbotBrain {
    /// Create a new TalkbotBrain with the given configuration.
    pub fn new(config: TalkbotConfig) -> Result<Self, BrainError> {
        if config.api_key.is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("TalkbotBrain initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a TalkbotBrain from environment variables.
    ///
    /// See [`TalkbotConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(TalkbotConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &TalkbotConfig {
        &self.config
    }
}

/// Normalize a provider answer into a [`Completion`].
///
/// - non-success status: failure carrying the status and the provider's reason
/// - `{"error": ...}` payload: failure
/// - choices with content: the first choice's content
/// - anything else (empty or malformed): the no-response sentinel
pub fn interpret_response(status: u16, body: &str) -> Completion {
    let parsed = serde_json::from_str::<ChatCompletionResponse>(body);

    if !(200..300).contains(&status) {
        let reason = parsed
            .ok()
            .and_then(|r| r.error_text())
            .unwrap_or_else(|| body.to_string());
        return Completion::failed(Some(status), reason);
    }

    match parsed {
        Ok(response) => {
            if let Some(error) = response.error_text() {
                return Completion::failed(Some(status), error);
            }
            match response.first_content() {
                Some(content) => Completion::content(content),
                None => Completion::content(NO_RESPONSE_TEXT),
            }
        }
        Err(e) => {
            warn!(error = %e, "Unparsable completion payload");
            Completion::content(NO_RESPONSE_TEXT)
        }
    }
}

#[async_trait]
impl Brain for TalkbotBrain {
    async fn complete(&self, request: CompletionRequest) -> Completion {
        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            stream: false,
        };

        debug!(
            model = %self.config.model,
            messages = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = match self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Completion request failed");
                return Completion::failed(None, e.to_string());
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status, error = %e, "Failed to read completion body");
                return Completion::failed(Some(status), e.to_string());
            }
        };

        let completion = interpret_response(status, &body);
        if let Completion::Failed { ref reason, .. } = completion {
            warn!(status, reason = %reason, "Completion provider returned an error");
        }
        completion
    }

    fn name(&self) -> &str {
        "TalkbotBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::ChatMessage;
    use std::time::Duration;

    #[test]
    fn test_success_payload() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Drink water."}}]}"#;
        assert_eq!(interpret_response(200, body), Completion::content("Drink water."));
    }

    #[test]
    fn test_error_payload_with_ok_status() {
        let body = r#"{"error":"quota exhausted"}"#;
        assert_eq!(
            interpret_response(200, body),
            Completion::failed(Some(200), "quota exhausted")
        );
    }

    #[test]
    fn test_error_object_with_bad_status() {
        let body = r#"{"error":{"message":"invalid key","type":"auth"}}"#;
        assert_eq!(
            interpret_response(401, body),
            Completion::failed(Some(401), "invalid key")
        );
    }

    #[test]
    fn test_plain_text_error_body() {
        assert_eq!(
            interpret_response(502, "Bad Gateway"),
            Completion::failed(Some(502), "Bad Gateway")
        );
    }

    #[test]
    fn test_empty_or_malformed_payload_uses_sentinel() {
        assert_eq!(interpret_response(200, "{}"), Completion::content(NO_RESPONSE_TEXT));
        assert_eq!(
            interpret_response(200, r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#),
            Completion::content(NO_RESPONSE_TEXT)
        );
        assert_eq!(interpret_response(200, "not json"), Completion::content(NO_RESPONSE_TEXT));
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: 300,
            temperature: 0.3,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][1]["role"], "user");
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = TalkbotBrain::new(TalkbotConfig::default());
        assert!(matches!(result, Err(BrainError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_normalized() {
        let config = TalkbotConfig::builder()
            .api_key("k")
            .api_url("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build();
        let brain = TalkbotBrain::new(config).unwrap();

        let completion = brain
            .complete(CompletionRequest::new(vec![ChatMessage::user("hi")], 300, 0.3))
            .await;
        assert!(matches!(completion, Completion::Failed { status: None, .. }));
    }
}
