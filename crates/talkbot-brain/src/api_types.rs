//! Provider request and response types.

use brain_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    /// Model to use
    pub model: &'a str,
    /// Messages in the conversation
    pub messages: &'a [ChatMessage],
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
    /// Repetition penalty
    pub frequency_penalty: f32,
    /// Presence penalty
    pub presence_penalty: f32,
    /// Always false; answers are read whole
    pub stream: bool,
}

/// Chat completion response.
///
/// The provider answers either with `choices` or with an `error` field, so
/// both are optional here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response choices
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Error payload (string or object)
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The message
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role
    #[serde(default)]
    pub role: Option<String>,
    /// Content (may be null)
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if present and non-empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|c| !c.trim().is_empty())
    }

    /// Readable error text, if the payload carries an error.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(describe_error)
    }
}

/// Turn an error value (`"text"` or `{"message": "text", ...}`) into text.
pub fn describe_error(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}
