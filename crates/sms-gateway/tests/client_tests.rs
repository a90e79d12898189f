//! Configuration and transport tests for sms-gateway.

use sms_gateway::{KavenegarClient, KavenegarConfig, SmsError};
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = KavenegarConfig::new("KEY");
    assert_eq!(config.base_url, "https://api.kavenegar.com");
    assert_eq!(config.template, "users");
    assert_eq!(
        config.verify_lookup_url(),
        "https://api.kavenegar.com/v1/KEY/verify/lookup.json"
    );
}

#[test]
fn test_custom_host_and_template() {
    let config = KavenegarConfig::new("KEY")
        .with_base_url("http://localhost:7000/")
        .with_template("otp");
    assert_eq!(
        config.verify_lookup_url(),
        "http://localhost:7000/v1/KEY/verify/lookup.json"
    );
    assert_eq!(config.template, "otp");
}

#[test]
fn test_debug_redacts_key() {
    let debug = format!("{:?}", KavenegarConfig::new("very-secret"));
    assert!(!debug.contains("very-secret"));
}

#[test]
fn test_empty_key_rejected() {
    assert!(matches!(
        KavenegarClient::new(KavenegarConfig::new("")),
        Err(SmsError::Config(_))
    ));
}

#[tokio::test]
async fn test_unreachable_host() {
    let mut config = KavenegarConfig::new("KEY").with_base_url("http://127.0.0.1:1");
    config.timeout = Duration::from_secs(2);
    let client = KavenegarClient::new(config).unwrap();

    let result = client.verify_lookup("09123456789", "123456").await;
    assert!(matches!(result, Err(SmsError::Http(_))));
}
