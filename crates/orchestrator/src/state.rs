//! Conversation state derived from stored account flags.
//!
//! Nothing stores this state. It is recomputed for every inbound message, so
//! out-of-order inputs simply act on whatever the flags say now.

use database::Account;

/// Where a chat identity stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// No account.
    Unregistered,
    /// Account exists but no phone number was given yet.
    AwaitingPhone,
    /// A code was issued and not yet verified.
    AwaitingOtp,
    /// Known phone, no pending code, not authenticated (logged out).
    SignedOut,
    /// Authenticated without a chosen persona.
    AuthenticatedNoRole,
    /// Authenticated with a chosen persona.
    AuthenticatedWithRole {
        /// Whether a chat session is currently active.
        session_active: bool,
    },
}

/// A precondition the chat-side intents require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    NotRegistered,
    NotAuthenticated,
    NoRole,
    QuotaExceeded,
}

impl ConversationState {
    /// Derive the state for an account (or its absence).
    pub fn derive(account: Option<&Account>, session_active: bool) -> Self {
        let Some(account) = account else {
            return ConversationState::Unregistered;
        };

        match (account.is_authenticated, account.has_assistant_role()) {
            (true, true) => ConversationState::AuthenticatedWithRole { session_active },
            (true, false) => ConversationState::AuthenticatedNoRole,
            (false, _) if account.has_pending_otp() => ConversationState::AwaitingOtp,
            (false, _) if account.phone_number.is_none() => ConversationState::AwaitingPhone,
            (false, _) => ConversationState::SignedOut,
        }
    }

    /// Whether the account may use chat-side intents.
    pub fn is_authenticated(self) -> bool {
        matches!(
            self,
            ConversationState::AuthenticatedNoRole | ConversationState::AuthenticatedWithRole { .. }
        )
    }

    /// Require a registered, authenticated account.
    pub fn require_authenticated(self) -> Result<(), Refusal> {
        match self {
            ConversationState::Unregistered => Err(Refusal::NotRegistered),
            s if !s.is_authenticated() => Err(Refusal::NotAuthenticated),
            _ => Ok(()),
        }
    }

    /// Require an authenticated account with a chosen persona.
    pub fn require_role(self) -> Result<(), Refusal> {
        self.require_authenticated()?;
        match self {
            ConversationState::AuthenticatedWithRole { .. } => Ok(()),
            _ => Err(Refusal::NoRole),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 1,
            chat_id: "1".to_string(),
            phone_number: None,
            otp_hash: None,
            is_authenticated: false,
            daily_message_limit: 23,
            current_message_count: 0,
            token_limit: 300,
            assistant_role: None,
            system_role: "therapeutic".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_login_progression() {
        assert_eq!(
            ConversationState::derive(None, false),
            ConversationState::Unregistered
        );

        let mut acct = account();
        assert_eq!(
            ConversationState::derive(Some(&acct), false),
            ConversationState::AwaitingPhone
        );

        acct.phone_number = Some("09123456789".to_string());
        acct.otp_hash = Some("abc".to_string());
        assert_eq!(
            ConversationState::derive(Some(&acct), false),
            ConversationState::AwaitingOtp
        );

        acct.otp_hash = None;
        acct.is_authenticated = true;
        assert_eq!(
            ConversationState::derive(Some(&acct), false),
            ConversationState::AuthenticatedNoRole
        );

        acct.assistant_role = Some("surgeon".to_string());
        assert_eq!(
            ConversationState::derive(Some(&acct), true),
            ConversationState::AuthenticatedWithRole { session_active: true }
        );

        acct.is_authenticated = false;
        assert_eq!(
            ConversationState::derive(Some(&acct), false),
            ConversationState::SignedOut
        );
    }

    #[test]
    fn test_preconditions() {
        let unregistered = ConversationState::Unregistered;
        assert_eq!(unregistered.require_authenticated(), Err(Refusal::NotRegistered));
        assert_eq!(unregistered.require_role(), Err(Refusal::NotRegistered));

        assert_eq!(
            ConversationState::AwaitingOtp.require_authenticated(),
            Err(Refusal::NotAuthenticated)
        );
        assert_eq!(
            ConversationState::AuthenticatedNoRole.require_role(),
            Err(Refusal::NoRole)
        );
        assert!(ConversationState::AuthenticatedWithRole { session_active: false }
            .require_role()
            .is_ok());
    }
}
