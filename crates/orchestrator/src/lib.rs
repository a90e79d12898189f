//! Conversation-state dispatcher for the Bale assistant bot.
//!
//! This crate provides the [`Dispatcher`] type which turns each inbound chat
//! text into exactly one state transition and a reply.
//!
//! # Features
//!
//! - Classifies text with a fixed priority order ([`classify`])
//! - Phone-number and one-time-code login ([`Authenticator`])
//! - Assistant role selection and confirmation
//! - Chat relay to a [`brain_core::Brain`] with a bounded history window
//! - Daily quota enforced with an atomic conditional increment
//! - Per-identity serialization of concurrent deliveries ([`IdentityLocks`])
//!
//! # Architecture
//!
//! ```text
//! Inbound text (from bot-webhook)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       DISPATCHER                            │
//! │                                                             │
//! │  1. Classify intent (/start, /login, phone, code, ...)      │
//! │         ↓                                                   │
//! │  2. Lock the chat identity                                  │
//! │         ↓                                                   │
//! │  3. Derive state from stored flags, check preconditions     │
//! │         ↓                                                   │
//! │  4. Apply the transition:                                   │
//! │     • auth flows → Authenticator (+ OTP delivery)           │
//! │     • role input → account role                             │
//! │     • chat → quota, prompt, Brain, active session           │
//! │         ↓                                                   │
//! │  5. Send the reply (failures are only logged)               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use orchestrator::{Authenticator, CodeHasher, Dispatcher, LoggingSender, RecordingOtp};
//!
//! let hasher = CodeHasher::new(b"secret")?;
//! let auth = Authenticator::new(db.clone(), Arc::new(RecordingOtp::new()), hasher);
//! let dispatcher = Dispatcher::new(db, auth, Arc::new(brain), Arc::new(LoggingSender));
//!
//! let outcome = dispatcher.dispatch("12345", "/login").await?;
//! ```

mod auth;
mod dispatcher;
mod error;
mod intent;
mod locks;
mod otp;
pub mod replies;
mod sender;
mod state;

// Public exports
pub use auth::{generate_code, Authenticator, CodeHasher, LogoutOutcome, PhoneOutcome, VerifyOutcome};
pub use dispatcher::{DispatchOutcome, DispatchStatus, Dispatcher, DispatcherConfig, CHAT_TEMPERATURE};
pub use error::OrchestratorError;
pub use intent::{classify, normalize_digits, Intent};
pub use locks::{IdentityGuard, IdentityLocks};
pub use otp::{FailingOtp, OtpDelivery, RecordingOtp};
pub use sender::{LoggingSender, MessageSender, NoOpSender, RecordingSender};
pub use state::{ConversationState, Refusal};
