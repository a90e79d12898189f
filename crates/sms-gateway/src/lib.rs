//! Kavenegar SMS client.
//!
//! Sends one-time codes through the Kavenegar template ("verify lookup")
//! endpoint.
//!
//! # Example
//!
//! ```no_run
//! use sms_gateway::{KavenegarClient, KavenegarConfig};
//!
//! # async fn example() -> Result<(), sms_gateway::SmsError> {
//! let client = KavenegarClient::new(KavenegarConfig::new("api-key"))?;
//! client.verify_lookup("09123456789", "123456").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::KavenegarClient;
pub use config::{KavenegarConfig, DEFAULT_API_URL, DEFAULT_TEMPLATE};
pub use error::SmsError;
pub use types::{LookupEntry, LookupResponse, ReturnStatus};
