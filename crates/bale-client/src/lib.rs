//! Bale messenger Bot API client library.
//!
//! This crate provides a Rust client for the Bale Bot API. It supports:
//!
//! - Sending text messages to a chat
//! - Parsing inbound webhook updates
//!
//! # Example
//!
//! ```no_run
//! use bale_client::{BaleClient, BaleConfig};
//!
//! # async fn example() -> Result<(), bale_client::BaleError> {
//! let client = BaleClient::new(BaleConfig::new("bot-token"))?;
//! client.send_text("123456789", "Hello!").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::BaleClient;
pub use config::{BaleConfig, DEFAULT_API_URL};
pub use error::BaleError;
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
