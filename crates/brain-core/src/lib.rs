//! Core trait and types for completion brains.
//!
//! This crate provides the shared interface between the dispatcher and the
//! language-model providers. It defines:
//!
//! - [`Brain`] - The completion gateway trait all providers implement
//! - [`CompletionRequest`] / [`Completion`] - Request and normalized outcome
//! - [`ChatMessage`] - Prompt messages
//! - [`build_prompt`] - Bounded prompt assembly from past exchanges
//!
//! # Example
//!
//! ```rust
//! use brain_core::{async_trait, Brain, Completion, CompletionRequest};
//!
//! struct MyBrain;
//!
//! #[async_trait]
//! impl Brain for MyBrain {
//!     async fn complete(&self, _request: CompletionRequest) -> Completion {
//!         Completion::content("Hello!")
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBrain"
//!     }
//! }
//! ```

mod completion;
mod error;
mod message;
mod prompt;
mod trait_def;

pub use completion::{Completion, CompletionRequest, NO_RESPONSE_TEXT};
pub use error::BrainError;
pub use message::{ChatMessage, Role};
pub use prompt::{build_prompt, system_prompt, Turn, ANSWER_INSTRUCTION, DEFAULT_HISTORY_TURNS};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
