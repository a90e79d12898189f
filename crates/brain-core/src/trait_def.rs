//! The Brain trait definition.

use async_trait::async_trait;

use crate::completion::{Completion, CompletionRequest};

/// A completion gateway: sends a prompt to a language model and returns
/// its answer.
///
/// Implementations must not fail: transport and provider errors are
/// reported as [`Completion::Failed`]. This trait is object-safe and can be
/// used with `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: CompletionRequest) -> Completion;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to process requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
