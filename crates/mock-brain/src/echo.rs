//! Echo brain implementation - echoes the last user message back.

use async_trait::async_trait;
use brain_core::{Brain, Completion, CompletionRequest, NO_RESPONSE_TEXT};

/// A simple brain that echoes the newest user message.
///
/// Useful for testing the message flow without any provider.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <original message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl Brain for EchoBrain {
    async fn complete(&self, request: CompletionRequest) -> Completion {
        let Some(text) = request.last_user_message() else {
            return Completion::content(NO_RESPONSE_TEXT);
        };

        match &self.prefix {
            Some(prefix) => Completion::content(format!("{}{}", prefix, text)),
            None => Completion::content(text),
        }
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brain_core::ChatMessage;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(
            vec![ChatMessage::system("persona"), ChatMessage::user(text)],
            300,
            0.3,
        )
    }

    #[tokio::test]
    async fn test_echo_no_prefix() {
        let brain = EchoBrain::new();
        assert_eq!(brain.complete(request("Hello!")).await, Completion::content("Hello!"));
    }

    #[tokio::test]
    async fn test_echo_with_prefix() {
        let brain = EchoBrain::with_prefix("Echo: ");
        assert_eq!(
            brain.complete(request("Hello!")).await,
            Completion::content("Echo: Hello!")
        );
    }

    #[tokio::test]
    async fn test_echo_without_user_message() {
        let brain = EchoBrain::new();
        let request = CompletionRequest::new(vec![ChatMessage::system("only")], 300, 0.3);
        assert_eq!(brain.complete(request).await, Completion::content(NO_RESPONSE_TEXT));
    }

    #[tokio::test]
    async fn test_brain_name_and_ready() {
        let brain = EchoBrain::new();
        assert_eq!(brain.name(), "EchoBrain");
        assert!(brain.is_ready().await);
    }
}
