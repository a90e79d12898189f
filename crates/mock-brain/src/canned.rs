//! Canned brain implementation - answers every request the same way.

use async_trait::async_trait;
use brain_core::{Brain, Completion, CompletionRequest};

/// A brain that returns a fixed completion for every request.
///
/// Use [`CannedBrain::failing`] to simulate a provider outage.
#[derive(Debug, Clone)]
pub struct CannedBrain {
    completion: Completion,
}

impl CannedBrain {
    /// Answer every request with `text`.
    pub fn answering(text: impl Into<String>) -> Self {
        Self {
            completion: Completion::content(text),
        }
    }

    /// Fail every request with the given status and reason.
    pub fn failing(status: Option<u16>, reason: impl Into<String>) -> Self {
        Self {
            completion: Completion::failed(status, reason),
        }
    }
}

#[async_trait]
impl Brain for CannedBrain {
    async fn complete(&self, _request: CompletionRequest) -> Completion {
        self.completion.clone()
    }

    fn name(&self) -> &str {
        "CannedBrain"
    }
}
