//! Phone-number and one-time-code authentication.
//!
//! Codes are six random digits. Only an HMAC-SHA256 fingerprint of the
//! pending code, keyed with a server secret, is stored; verification compares
//! fingerprints inside a single conditional update so a code can be consumed
//! at most once.

use std::env;
use std::fmt;
use std::sync::Arc;

use database::validation::mask_phone;
use database::{account, Database, DatabaseError};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use tracing::{info, warn};

use crate::error::OrchestratorError;
use crate::otp::OtpDelivery;

/// Result of submitting a phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneOutcome {
    /// Code stored and handed to the provider.
    CodeSent,
    /// Code stored but the provider failed; the user may try again.
    DeliveryFailed,
    /// Another account already owns this phone number. Nothing changed.
    PhoneTaken,
}

/// Result of submitting a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    InvalidCode,
}

/// Result of a logout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut,
    NotRegistered,
}

/// Issues and verifies one-time codes bound to chat identities.
#[derive(Clone)]
pub struct Authenticator {
    database: Database,
    otp: Arc<dyn OtpDelivery>,
    hasher: CodeHasher,
}

/// Keyed fingerprints of one-time codes.
///
/// Without the secret a stored fingerprint cannot be matched against the
/// million possible codes.
#[derive(Clone)]
pub struct CodeHasher {
    mac: Hmac<Sha256>,
}

impl CodeHasher {
    /// Create a hasher keyed with `secret`, which must not be empty.
    pub fn new(secret: &[u8]) -> Result<Self, OrchestratorError> {
        if secret.is_empty() {
            return Err(OrchestratorError::Configuration(
                "code secret must not be empty".to_string(),
            ));
        }
        let mac = Hmac::<Sha256>::new_from_slice(secret)
            .map_err(|e| OrchestratorError::Configuration(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Read the secret from `OTP_SECRET`.
    pub fn from_env() -> Result<Self, OrchestratorError> {
        let secret = env::var("OTP_SECRET")
            .map_err(|_| OrchestratorError::Configuration("OTP_SECRET not set".to_string()))?;
        Self::new(secret.as_bytes())
    }

    /// Hex HMAC-SHA256 of a code.
    pub fn fingerprint(&self, code: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(code.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl fmt::Debug for CodeHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeHasher").finish_non_exhaustive()
    }
}

/// Draw a six-digit code uniformly from 100000..=999999.
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999).to_string()
}

impl Authenticator {
    /// Create an authenticator.
    pub fn new(database: Database, otp: Arc<dyn OtpDelivery>, hasher: CodeHasher) -> Self {
        Self {
            database,
            otp,
            hasher,
        }
    }

    /// Make sure an account exists. Returns whether it was created.
    pub async fn request_login(&self, chat_id: &str) -> Result<bool, OrchestratorError> {
        let (_, created) = account::get_or_create_account(self.database.pool(), chat_id).await?;
        if created {
            info!(chat_id, "Account created");
        }
        Ok(created)
    }

    /// Store `phone` with a fresh pending code and deliver the code.
    ///
    /// A delivery failure leaves the phone and the pending code in place.
    pub async fn submit_phone(
        &self,
        chat_id: &str,
        phone: &str,
    ) -> Result<PhoneOutcome, OrchestratorError> {
        let code = generate_code();

        match account::set_pending_otp(self.database.pool(), chat_id, phone, &self.hasher.fingerprint(&code))
            .await
        {
            Ok(_) => {}
            Err(DatabaseError::AlreadyExists { .. }) => {
                warn!(chat_id, phone = %mask_phone(phone), "Phone number belongs to another account");
                return Ok(PhoneOutcome::PhoneTaken);
            }
            Err(e) => return Err(e.into()),
        }

        match self.otp.send_code(phone, &code).await {
            Ok(()) => {
                info!(chat_id, phone = %mask_phone(phone), "Code sent");
                Ok(PhoneOutcome::CodeSent)
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Code delivery failed");
                Ok(PhoneOutcome::DeliveryFailed)
            }
        }
    }

    /// Consume the pending code if `code` matches it.
    pub async fn verify_otp(
        &self,
        chat_id: &str,
        code: &str,
    ) -> Result<VerifyOutcome, OrchestratorError> {
        if account::verify_otp(self.database.pool(), chat_id, &self.hasher.fingerprint(code)).await? {
            info!(chat_id, "Account authenticated");
            Ok(VerifyOutcome::Verified)
        } else {
            Ok(VerifyOutcome::InvalidCode)
        }
    }

    /// Clear the authenticated flag.
    pub async fn logout(&self, chat_id: &str) -> Result<LogoutOutcome, OrchestratorError> {
        if account::set_authenticated(self.database.pool(), chat_id, false).await? {
            info!(chat_id, "Logged out");
            Ok(LogoutOutcome::LoggedOut)
        } else {
            Ok(LogoutOutcome::NotRegistered)
        }
    }
}
