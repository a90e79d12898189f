//! Mock completion brains.
//!
//! This crate provides mock implementations of the `Brain` trait for testing:
//! - `EchoBrain` - Answers with the last user message
//! - `CannedBrain` - Answers every request with a fixed completion
//! - `RecordingBrain` - Wraps another brain and records every request
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For production use, use the `talkbot-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, ChatMessage, CompletionRequest, EchoBrain};
//!
//! #[tokio::main]
//! async fn main() {
//!     let brain = EchoBrain::new();
//!     let request = CompletionRequest::new(vec![ChatMessage::user("Hello!")], 300, 0.3);
//!
//!     let completion = brain.complete(request).await;
//!     println!("Response: {}", completion);
//! }
//! ```

mod canned;
mod delayed;
mod echo;
mod recording;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, ChatMessage, Completion, CompletionRequest};

// Export mock implementations
pub use canned::CannedBrain;
pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use recording::RecordingBrain;
