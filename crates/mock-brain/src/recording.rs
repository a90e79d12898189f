//! Recording brain implementation - captures every request it sees.

use std::sync::Arc;

use async_trait::async_trait;
use brain_core::{Brain, Completion, CompletionRequest};
use tokio::sync::Mutex;

/// A brain that records each request before delegating to an inner brain.
///
/// Clones share the same record, so a test can keep a handle after passing
/// the brain to the code under test.
pub struct RecordingBrain<B: Brain> {
    inner: Arc<B>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl<B: Brain> Clone for RecordingBrain<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            requests: Arc::clone(&self.requests),
        }
    }
}

impl<B: Brain> RecordingBrain<B> {
    /// Wrap `inner`.
    pub fn new(inner: B) -> Self {
        Self {
            inner: Arc::new(inner),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All requests seen so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests seen so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// The most recent request.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl<B: Brain> Brain for RecordingBrain<B> {
    async fn complete(&self, request: CompletionRequest) -> Completion {
        self.requests.lock().await.push(request.clone());
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        "RecordingBrain"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EchoBrain;
    use brain_core::ChatMessage;

    #[tokio::test]
    async fn test_records_and_delegates() {
        let brain = RecordingBrain::new(EchoBrain::new());
        let handle = brain.clone();

        let completion = brain
            .complete(CompletionRequest::new(vec![ChatMessage::user("one")], 300, 0.3))
            .await;
        assert_eq!(completion, Completion::content("one"));

        brain
            .complete(CompletionRequest::new(vec![ChatMessage::user("two")], 500, 0.3))
            .await;

        assert_eq!(handle.call_count().await, 2);
        let last = handle.last_request().await.unwrap();
        assert_eq!(last.max_tokens, 500);
        assert_eq!(last.last_user_message(), Some("two"));
    }

    #[tokio::test]
    async fn test_concurrent_calls_all_recorded() {
        let brain = RecordingBrain::new(EchoBrain::new());

        let calls = (0..8).map(|i| {
            let brain = brain.clone();
            async move {
                brain
                    .complete(CompletionRequest::new(
                        vec![ChatMessage::user(format!("m{}", i))],
                        300,
                        0.3,
                    ))
                    .await
            }
        });
        futures::future::join_all(calls).await;

        assert_eq!(brain.call_count().await, 8);
    }
}
