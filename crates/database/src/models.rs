//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::catalog::{AssistantRole, SystemRole};

/// A messenger user, keyed by the chat identity the platform assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Row ID.
    pub id: i64,
    /// Messenger chat identity. Immutable once created.
    pub chat_id: String,
    /// Verified (or pending) phone number, unique across accounts.
    pub phone_number: Option<String>,
    /// Keyed fingerprint of the pending one-time code, if any.
    #[serde(skip_serializing)]
    pub otp_hash: Option<String>,
    /// Set after a successful code verification, cleared on logout.
    pub is_authenticated: bool,
    /// Accepted chat messages allowed per day.
    pub daily_message_limit: i64,
    /// Accepted chat messages so far.
    pub current_message_count: i64,
    /// Maximum response tokens requested from the completion provider.
    pub token_limit: i64,
    /// Key of the chosen assistant persona, if one was chosen.
    pub assistant_role: Option<String>,
    /// Key of the session framing.
    pub system_role: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl Account {
    /// Whether a one-time code is waiting to be verified.
    pub fn has_pending_otp(&self) -> bool {
        self.otp_hash.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Whether another chat message fits in today's quota.
    pub fn has_quota(&self) -> bool {
        self.current_message_count < self.daily_message_limit
    }

    /// Messages left for today (never negative).
    pub fn remaining_messages(&self) -> i64 {
        (self.daily_message_limit - self.current_message_count).max(0)
    }

    /// The chosen assistant persona, if the stored key is set and known.
    pub fn assistant_role(&self) -> Option<AssistantRole> {
        self.assistant_role
            .as_deref()
            .and_then(AssistantRole::from_key)
    }

    /// Whether an assistant persona has been chosen.
    pub fn has_assistant_role(&self) -> bool {
        self.assistant_role.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// The session framing, falling back to the default for unknown keys.
    pub fn system_role(&self) -> SystemRole {
        SystemRole::from_key(&self.system_role).unwrap_or_default()
    }
}

/// The single mutable "current exchange" record of a user, or an ended one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatSession {
    /// Row ID.
    pub id: i64,
    /// Owning account.
    pub account_id: i64,
    /// At most one active session exists per account.
    pub is_active: bool,
    /// Last user message accepted into the chat flow.
    pub user_message: String,
    /// Answer returned for `user_message`.
    pub bot_response: String,
    /// Assistant persona key in effect when recorded.
    pub assistant_role: String,
    /// System framing key in effect when recorded.
    pub system_role: String,
    /// Creation timestamp, used for recency ordering.
    pub created_at: String,
}
