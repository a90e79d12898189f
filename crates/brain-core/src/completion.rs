//! Completion request and normalized outcome.

use std::fmt;

use crate::message::ChatMessage;

/// Answer text used when the provider replies successfully but without content.
pub const NO_RESPONSE_TEXT: &str = "پاسخی دریافت نشد.";

/// A prompt plus the sampling parameters that vary per call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered prompt messages.
    pub messages: Vec<ChatMessage>,
    /// Maximum response tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Create a request.
    pub fn new(messages: Vec<ChatMessage>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            messages,
            max_tokens,
            temperature,
        }
    }

    /// The last user message, if any.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Normalized result of a completion call. Providers never raise; they
/// report failures here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The first response message content.
    Content(String),
    /// Transport failure, non-success status, or an error payload.
    Failed {
        /// HTTP status, when the provider answered at all.
        status: Option<u16>,
        /// Provider or transport reason.
        reason: String,
    },
}

impl Completion {
    /// Successful completion.
    pub fn content(text: impl Into<String>) -> Self {
        Completion::Content(text.into())
    }

    /// Failed completion.
    pub fn failed(status: Option<u16>, reason: impl Into<String>) -> Self {
        Completion::Failed {
            status,
            reason: reason.into(),
        }
    }

    /// Whether the call produced content.
    pub fn is_content(&self) -> bool {
        matches!(self, Completion::Content(_))
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Content(text) => f.write_str(text),
            Completion::Failed {
                status: Some(status),
                reason,
            } => write!(f, "{} - {}", status, reason),
            Completion::Failed {
                status: None,
                reason,
            } => write!(f, "Request error: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        assert_eq!(
            Completion::failed(Some(503), "overloaded").to_string(),
            "503 - overloaded"
        );
        assert_eq!(
            Completion::failed(None, "connection refused").to_string(),
            "Request error: connection refused"
        );
    }

    #[test]
    fn test_last_user_message() {
        let request = CompletionRequest::new(
            vec![
                ChatMessage::system("sys"),
                ChatMessage::user("first"),
                ChatMessage::assistant("reply"),
                ChatMessage::user("second"),
            ],
            300,
            0.3,
        );
        assert_eq!(request.last_user_message(), Some("second"));
    }
}
