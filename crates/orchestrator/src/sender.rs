//! Message sender trait and implementations.

use std::sync::Arc;

use async_trait::async_trait;
use bale_client::BaleClient;
use tokio::sync::Mutex;

use crate::error::OrchestratorError;

/// Trait for sending text replies to a chat.
///
/// Abstracted to support different transports (Bale, tests, etc.)
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a text message.
    ///
    /// # Arguments
    /// * `chat_id` - Target chat identity
    /// * `text` - Message content
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), OrchestratorError>;
}

#[async_trait]
impl MessageSender for BaleClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), OrchestratorError> {
        self.send_text(chat_id, text)
            .await
            .map(|_| ())
            .map_err(|e| OrchestratorError::SendFailed(e.to_string()))
    }
}

/// A no-op message sender for testing that discards all messages.
#[derive(Debug, Clone, Default)]
pub struct NoOpSender;

#[async_trait]
impl MessageSender for NoOpSender {
    async fn send_message(&self, _chat_id: &str, _text: &str) -> Result<(), OrchestratorError> {
        Ok(())
    }
}

/// A logging message sender for debugging that logs all operations.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), OrchestratorError> {
        tracing::info!("Sending message to {}: {}", chat_id, text);
        Ok(())
    }
}

/// A sender that keeps every message it was asked to send.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingSender {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(chat_id, text)` pairs sent so far.
    pub async fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// Texts sent to one chat, oldest first.
    pub async fn sent_to(&self, chat_id: &str) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| id == chat_id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// The last text sent to one chat.
    pub async fn last_to(&self, chat_id: &str) -> Option<String> {
        self.sent_to(chat_id).await.pop()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), OrchestratorError> {
        self.sent
            .lock()
            .await
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}
