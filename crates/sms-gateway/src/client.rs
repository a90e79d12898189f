//! Kavenegar HTTP client.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::KavenegarConfig;
use crate::error::SmsError;
use crate::types::{LookupEntry, LookupResponse};

/// Client for the Kavenegar REST API.
#[derive(Clone)]
pub struct KavenegarClient {
    http: Client,
    config: KavenegarConfig,
}

impl KavenegarClient {
    /// Create a client.
    pub fn new(config: KavenegarConfig) -> Result<Self, SmsError> {
        if config.api_key.trim().is_empty() {
            return Err(SmsError::Config("API key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(SmsError::Http)?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self, SmsError> {
        Self::new(KavenegarConfig::from_env()?)
    }

    /// Send `token` to `receptor` using the configured verification template.
    pub async fn verify_lookup(
        &self,
        receptor: &str,
        token: &str,
    ) -> Result<Vec<LookupEntry>, SmsError> {
        let form = [
            ("receptor", receptor),
            ("token", token),
            ("template", self.config.template.as_str()),
        ];

        debug!(template = %self.config.template, "verify/lookup");

        let response = self
            .http
            .post(self.config.verify_lookup_url())
            .form(&form)
            .send()
            .await
            .map_err(SmsError::Http)?;

        let http_status = response.status().as_u16();
        let body = response.text().await.map_err(SmsError::Http)?;

        parse_lookup_response(http_status, &body)
    }

    /// Get the configuration.
    pub fn config(&self) -> &KavenegarConfig {
        &self.config
    }
}

/// Interpret a verify-lookup answer.
///
/// The provider reports failures both through the HTTP status and through
/// `return.status`; either one being non-200 is an error.
pub(crate) fn parse_lookup_response(
    http_status: u16,
    body: &str,
) -> Result<Vec<LookupEntry>, SmsError> {
    match serde_json::from_str::<LookupResponse>(body) {
        Ok(parsed) if parsed.is_success() && (200..300).contains(&http_status) => {
            Ok(parsed.entries.unwrap_or_default())
        }
        Ok(parsed) => {
            warn!(
                status = parsed.status.status,
                message = %parsed.status.message,
                "verify/lookup rejected"
            );
            Err(SmsError::Provider {
                status: parsed.status.status,
                message: parsed.status.message,
            })
        }
        Err(_) if !(200..300).contains(&http_status) => Err(SmsError::Provider {
            status: http_status,
            message: body.to_string(),
        }),
        Err(e) => Err(SmsError::Malformed(e.to_string())),
    }
}

impl std::fmt::Debug for KavenegarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KavenegarClient")
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response() {
        let body = r#"{
            "return": {"status": 200, "message": "confirmed"},
            "entries": [{"messageid": 8792343, "message": "code", "status": 5,
                         "statustext": "sent", "sender": "10004346",
                         "receptor": "09123456789", "date": 1356619709, "cost": 120}]
        }"#;
        let entries = parse_lookup_response(200, body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message_id, 8792343);
        assert_eq!(entries[0].receptor, "09123456789");
    }

    #[test]
    fn test_provider_error_in_body() {
        let body = r#"{"return": {"status": 424, "message": "template not found"}, "entries": null}"#;
        let err = parse_lookup_response(424, body).unwrap_err();
        assert!(matches!(err, SmsError::Provider { status: 424, .. }));
    }

    #[test]
    fn test_non_json_error() {
        let err = parse_lookup_response(502, "Bad Gateway").unwrap_err();
        assert!(matches!(err, SmsError::Provider { status: 502, .. }));
    }

    #[test]
    fn test_malformed_success() {
        let err = parse_lookup_response(200, "<html>").unwrap_err();
        assert!(matches!(err, SmsError::Malformed(_)));
    }
}
