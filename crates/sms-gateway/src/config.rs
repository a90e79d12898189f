//! Configuration for the Kavenegar client.

use std::env;
use std::time::Duration;

use crate::error::SmsError;

/// Default API host.
pub const DEFAULT_API_URL: &str = "https://api.kavenegar.com";

/// Template name registered for verification codes.
pub const DEFAULT_TEMPLATE: &str = "users";

/// Kavenegar connection settings.
#[derive(Clone)]
pub struct KavenegarConfig {
    /// API key; part of the request path.
    pub api_key: String,
    /// API host.
    pub base_url: String,
    /// Verification template name.
    pub template: String,
    /// Outbound request timeout.
    pub timeout: Duration,
}

impl KavenegarConfig {
    /// Create a configuration with default host and template.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_API_URL.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Use a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Create configuration from environment variables.
    ///
    /// - `KAVENEGAR_API_KEY` (required)
    /// - `KAVENEGAR_API_URL` (default: `https://api.kavenegar.com`)
    /// - `KAVENEGAR_TEMPLATE` (default: `users`)
    pub fn from_env() -> Result<Self, SmsError> {
        let api_key = env::var("KAVENEGAR_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SmsError::Config("KAVENEGAR_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(url) = env::var("KAVENEGAR_API_URL") {
            config.base_url = url;
        }
        if let Ok(template) = env::var("KAVENEGAR_TEMPLATE") {
            config.template = template;
        }
        Ok(config)
    }

    /// Verify-lookup endpoint URL.
    pub fn verify_lookup_url(&self) -> String {
        format!(
            "{}/v1/{}/verify/lookup.json",
            self.base_url.trim_end_matches('/'),
            self.api_key
        )
    }
}

impl std::fmt::Debug for KavenegarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KavenegarConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("template", &self.template)
            .field("timeout", &self.timeout)
            .finish()
    }
}
