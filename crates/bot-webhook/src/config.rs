//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use bale_client::{BaleConfig, BaleError};
use brain_core::BrainError;
use orchestrator::{CodeHasher, DispatcherConfig, OrchestratorError};
use sms_gateway::{KavenegarConfig, SmsError};
use talkbot_brain::TalkbotConfig;

/// Default webhook route.
pub const DEFAULT_WEBHOOK_PATH: &str = "/bale/webhook";

/// Default SQLite URL.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:bot.db?mode=rwc";

/// Webhook server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Route the platform posts updates to.
    pub webhook_path: String,
    /// SQLite database URL.
    pub database_url: String,
    /// Outbound messenger client.
    pub bale: BaleConfig,
    /// OTP SMS provider.
    pub kavenegar: KavenegarConfig,
    /// Completion provider.
    pub talkbot: TalkbotConfig,
    /// Dispatcher tuning.
    pub dispatcher: DispatcherConfig,
    /// Keyed fingerprints for one-time codes.
    pub code_hasher: CodeHasher,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `BOT_ADDR` | Server bind address | `127.0.0.1:8000` |
    /// | `WEBHOOK_PATH` | Webhook route | `/bale/webhook` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:bot.db?mode=rwc` |
    /// | `BALE_BOT_TOKEN` | Bot token | (required) |
    /// | `KAVENEGAR_API_KEY` | SMS API key | (required) |
    /// | `TALKBOT_API_KEY` | Completion API key | (required) |
    /// | `OTP_SECRET` | Key for stored code fingerprints | (required) |
    /// | `HISTORY_TURNS` | Past exchanges per prompt | `5` |
    ///
    /// Client crates read their own optional variables (`BALE_API_URL`,
    /// `KAVENEGAR_API_URL`, `KAVENEGAR_TEMPLATE`, `TALKBOT_*`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("BOT_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let webhook_path =
            env::var("WEBHOOK_PATH").unwrap_or_else(|_| DEFAULT_WEBHOOK_PATH.to_string());
        if !webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidWebhookPath(webhook_path));
        }

        Ok(Self {
            addr,
            webhook_path,
            database_url: database_url_from_env(),
            bale: BaleConfig::from_env()?,
            kavenegar: KavenegarConfig::from_env()?,
            talkbot: TalkbotConfig::from_env()?,
            dispatcher: DispatcherConfig::from_env(),
            code_hasher: CodeHasher::from_env()?,
        })
    }
}

/// `SQLITE_PATH`, or the default database URL.
pub fn database_url_from_env() -> String {
    env::var("SQLITE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid BOT_ADDR format")]
    InvalidAddr,

    #[error("WEBHOOK_PATH must start with '/': {0}")]
    InvalidWebhookPath(String),

    #[error("Messenger configuration: {0}")]
    Bale(#[from] BaleError),

    #[error("SMS configuration: {0}")]
    Sms(#[from] SmsError),

    #[error("Completion provider configuration: {0}")]
    Brain(#[from] BrainError),

    #[error("Code secret: {0}")]
    CodeSecret(#[from] OrchestratorError),
}
