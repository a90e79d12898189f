//! OpenAI-compatible completion brain.
//!
//! This crate provides a [`Brain`] implementation that calls the TalkBot
//! chat completions API (any OpenAI-compatible endpoint works).
//!
//! # Features
//!
//! - Stateless: the caller sends the bounded prompt on every call
//! - Never raises: transport and provider errors come back as
//!   [`Completion::Failed`]
//! - Accepts both `{"choices": [...]}` and `{"error": ...}` payloads
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use talkbot_brain::{Brain, ChatMessage, CompletionRequest, TalkbotBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = TalkbotBrain::from_env()?;
//!     let request = CompletionRequest::new(vec![ChatMessage::user("Hello")], 300, 0.3);
//!     println!("{}", brain.complete(request).await);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::{interpret_response, TalkbotBrain};
pub use config::{TalkbotConfig, TalkbotConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, ChatMessage, Completion, CompletionRequest};
