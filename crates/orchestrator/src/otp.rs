//! One-time code delivery seam.

use std::sync::Arc;

use async_trait::async_trait;
use database::validation::mask_phone;
use sms_gateway::KavenegarClient;
use tokio::sync::Mutex;

use crate::error::OrchestratorError;

/// Delivers a one-time code to a phone number.
#[async_trait]
pub trait OtpDelivery: Send + Sync {
    /// Send `code` to `phone`.
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), OrchestratorError>;
}

#[async_trait]
impl OtpDelivery for KavenegarClient {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), OrchestratorError> {
        self.verify_lookup(phone, code)
            .await
            .map(|_| ())
            .map_err(|e| OrchestratorError::OtpDelivery(e.to_string()))
    }
}

/// Records every delivered code instead of sending it.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingOtp {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingOtp {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent code sent to `phone`.
    pub async fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
    }

    /// Number of deliveries so far.
    pub async fn count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl OtpDelivery for RecordingOtp {
    async fn send_code(&self, phone: &str, code: &str) -> Result<(), OrchestratorError> {
        self.sent
            .lock()
            .await
            .push((phone.to_string(), code.to_string()));
        Ok(())
    }
}

/// Fails every delivery.
#[derive(Debug, Clone, Default)]
pub struct FailingOtp;

#[async_trait]
impl OtpDelivery for FailingOtp {
    async fn send_code(&self, phone: &str, _code: &str) -> Result<(), OrchestratorError> {
        Err(OrchestratorError::OtpDelivery(format!(
            "provider unavailable for {}",
            mask_phone(phone)
        )))
    }
}
