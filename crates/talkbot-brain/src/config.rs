//! Configuration for TalkbotBrain.

use brain_core::BrainError;
use std::env;
use std::time::Duration;

/// Default provider base URL.
pub const DEFAULT_API_URL: &str = "https://api.talkbot.ir";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for TalkbotBrain.
///
/// Per-call values (max tokens, temperature) travel on the
/// [`brain_core::CompletionRequest`]; everything fixed per deployment lives here.
#[derive(Clone)]
pub struct TalkbotConfig {
    /// Provider base URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Nucleus sampling threshold.
    pub top_p: f32,

    /// Repetition penalty.
    pub frequency_penalty: f32,

    /// Presence penalty.
    pub presence_penalty: f32,

    /// Outbound request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for TalkbotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TalkbotConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("top_p", &self.top_p)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("presence_penalty", &self.presence_penalty)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for TalkbotConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            timeout: Duration::from_secs(60),
        }
    }
}

impl TalkbotConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `TALKBOT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `TALKBOT_API_URL` - API URL (default: https://api.talkbot.ir)
    /// - `TALKBOT_MODEL` - Model name (default: gpt-4o-mini)
    /// - `TALKBOT_TOP_P` - Top-p (default: 1.0)
    /// - `TALKBOT_FREQUENCY_PENALTY` - Frequency penalty (default: 0.0)
    /// - `TALKBOT_PRESENCE_PENALTY` - Presence penalty (default: 0.0)
    /// - `TALKBOT_TIMEOUT_SECS` - Request timeout in seconds (default: 60)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("TALKBOT_API_KEY")
            .map_err(|_| BrainError::Configuration("TALKBOT_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("TALKBOT_API_URL").unwrap_or(defaults.api_url);
        let model = env::var("TALKBOT_MODEL").unwrap_or(defaults.model);

        let top_p = env::var("TALKBOT_TOP_P")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.top_p);

        let frequency_penalty = env::var("TALKBOT_FREQUENCY_PENALTY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.frequency_penalty);

        let presence_penalty = env::var("TALKBOT_PRESENCE_PENALTY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.presence_penalty);

        let timeout = env::var("TALKBOT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        Ok(Self {
            api_url,
            api_key,
            model,
            top_p,
            frequency_penalty,
            presence_penalty,
            timeout,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> TalkbotConfigBuilder {
        TalkbotConfigBuilder::default()
    }

    /// Chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for TalkbotConfig.
#[derive(Debug, Default)]
pub struct TalkbotConfigBuilder {
    config: TalkbotConfig,
}

impl TalkbotConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set top-p.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = top_p;
        self
    }

    /// Set the frequency penalty.
    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.config.frequency_penalty = penalty;
        self
    }

    /// Set the presence penalty.
    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.config.presence_penalty = penalty;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TalkbotConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TalkbotConfig::default();

        assert_eq!(config.api_url, "https://api.talkbot.ir");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.frequency_penalty, 0.0);
        assert_eq!(config.presence_penalty, 0.0);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_builder_all_options() {
        let config = TalkbotConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.com/")
            .model("gpt-4o")
            .top_p(0.9)
            .frequency_penalty(0.5)
            .presence_penalty(0.25)
            .timeout(Duration::from_secs(5))
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.frequency_penalty, 0.5);
        assert_eq!(config.presence_penalty, 0.25);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.completions_url(),
            "https://custom.api.com/v1/chat/completions"
        );
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_talkbot_vars() {
            for var in [
                "TALKBOT_API_KEY",
                "TALKBOT_API_URL",
                "TALKBOT_MODEL",
                "TALKBOT_TOP_P",
                "TALKBOT_FREQUENCY_PENALTY",
                "TALKBOT_PRESENCE_PENALTY",
                "TALKBOT_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        // Missing API key should error
        clear_all_talkbot_vars();
        match TalkbotConfig::from_env() {
            Err(BrainError::Configuration(msg)) => assert!(msg.contains("TALKBOT_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Only API key set, defaults used
        clear_all_talkbot_vars();
        std::env::set_var("TALKBOT_API_KEY", "test-env-key");
        let config = TalkbotConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);

        // Overrides, with an unparsable value falling back to the default
        clear_all_talkbot_vars();
        std::env::set_var("TALKBOT_API_KEY", "k");
        std::env::set_var("TALKBOT_MODEL", "gpt-4o");
        std::env::set_var("TALKBOT_TOP_P", "0.8");
        std::env::set_var("TALKBOT_TIMEOUT_SECS", "not-a-number");
        let config = TalkbotConfig::from_env().unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.top_p, 0.8);
        assert_eq!(config.timeout, Duration::from_secs(60));

        clear_all_talkbot_vars();
    }
}
