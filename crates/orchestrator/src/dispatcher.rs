//! Conversation-state dispatcher.

use std::env;
use std::sync::Arc;

use brain_core::{build_prompt, Brain, Completion, CompletionRequest, Turn, DEFAULT_HISTORY_TURNS};
use database::catalog::assistant_description;
use database::validation::DEFAULT_TOKEN_LIMIT;
use database::{account, session, Account, AssistantRole, Database, Exchange};
use tracing::{debug, info, warn};

use crate::auth::{Authenticator, LogoutOutcome, PhoneOutcome, VerifyOutcome};
use crate::error::OrchestratorError;
use crate::intent::{classify, Intent};
use crate::locks::IdentityLocks;
use crate::replies;
use crate::sender::MessageSender;
use crate::state::{ConversationState, Refusal};

/// Sampling temperature for chat completions.
pub const CHAT_TEMPERATURE: f32 = 0.3;

/// Dispatcher tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    /// Past exchanges included in each prompt.
    pub history_turns: usize,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            history_turns: DEFAULT_HISTORY_TURNS,
            temperature: CHAT_TEMPERATURE,
        }
    }
}

impl DispatcherConfig {
    /// Read `HISTORY_TURNS`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(turns) = env::var("HISTORY_TURNS").ok().and_then(|v| v.parse().ok()) {
            config.history_turns = turns;
        }
        config
    }
}

/// How a message was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStatus {
    /// Handled, including user-facing errors such as a wrong code.
    Handled,
    /// Refused because the account is missing, signed out, has no role, or is out of quota.
    PreconditionFailed,
    /// Nothing to do (empty text).
    Ignored,
}

/// Outcome of one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: DispatchStatus,
    /// Text sent back to the chat, if any.
    pub reply: Option<String>,
}

impl DispatchOutcome {
    fn handled(reply: impl Into<String>) -> Self {
        Self {
            status: DispatchStatus::Handled,
            reply: Some(reply.into()),
        }
    }

    fn refused(refusal: Refusal) -> Self {
        let reply = match refusal {
            Refusal::NotRegistered => replies::NOT_REGISTERED,
            Refusal::NotAuthenticated => replies::LOGIN_REQUIRED,
            Refusal::NoRole => replies::NO_ROLE,
            Refusal::QuotaExceeded => replies::QUOTA_EXCEEDED,
        };
        Self {
            status: DispatchStatus::PreconditionFailed,
            reply: Some(reply.to_string()),
        }
    }

    fn ignored() -> Self {
        Self {
            status: DispatchStatus::Ignored,
            reply: None,
        }
    }
}

/// Decides what each inbound message means for its chat identity, applies
/// the transition, and sends the reply.
///
/// Handling of one identity is serialized; different identities proceed
/// concurrently.
pub struct Dispatcher {
    database: Database,
    auth: Authenticator,
    brain: Arc<dyn Brain>,
    sender: Arc<dyn MessageSender>,
    locks: IdentityLocks,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create a dispatcher with default tuning.
    pub fn new(
        database: Database,
        auth: Authenticator,
        brain: Arc<dyn Brain>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self::with_config(database, auth, brain, sender, DispatcherConfig::default())
    }

    /// Create a dispatcher with explicit tuning.
    pub fn with_config(
        database: Database,
        auth: Authenticator,
        brain: Arc<dyn Brain>,
        sender: Arc<dyn MessageSender>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            database,
            auth,
            brain,
            sender,
            locks: IdentityLocks::new(),
            config,
        }
    }

    /// Handle one inbound text for `chat_id`.
    ///
    /// Only storage faults are returned as errors. Provider and delivery
    /// failures become replies.
    pub async fn dispatch(
        &self,
        chat_id: &str,
        text: &str,
    ) -> Result<DispatchOutcome, OrchestratorError> {
        if text.trim().is_empty() {
            debug!(chat_id, "Ignoring empty message");
            return Ok(DispatchOutcome::ignored());
        }

        let intent = classify(text);
        debug!(chat_id, intent = intent_name(&intent), "Dispatching");

        // The reply is sent under the guard so replies for one identity keep their order.
        let _guard = self.locks.lock(chat_id).await;
        let outcome = self.handle(chat_id, intent).await?;

        if let Some(reply) = &outcome.reply {
            if let Err(e) = self.sender.send_message(chat_id, reply).await {
                warn!(chat_id, error = %e, "Failed to send reply");
            }
        }

        Ok(outcome)
    }

    async fn handle(
        &self,
        chat_id: &str,
        intent: Intent,
    ) -> Result<DispatchOutcome, OrchestratorError> {
        match intent {
            Intent::Help => Ok(DispatchOutcome::handled(replies::HELP_TEXT)),
            Intent::Login => {
                self.auth.request_login(chat_id).await?;
                Ok(DispatchOutcome::handled(replies::ASK_PHONE))
            }
            Intent::SubmitPhone(phone) => {
                let reply = match self.auth.submit_phone(chat_id, &phone).await? {
                    PhoneOutcome::CodeSent => replies::CODE_SENT,
                    PhoneOutcome::DeliveryFailed => replies::CODE_DELIVERY_FAILED,
                    PhoneOutcome::PhoneTaken => replies::PHONE_TAKEN,
                };
                Ok(DispatchOutcome::handled(reply))
            }
            Intent::SubmitOtp(code) => {
                let reply = match self.auth.verify_otp(chat_id, &code).await? {
                    VerifyOutcome::Verified => replies::LOGIN_SUCCEEDED,
                    VerifyOutcome::InvalidCode => replies::INVALID_CODE,
                };
                Ok(DispatchOutcome::handled(reply))
            }
            Intent::Logout => {
                let reply = match self.auth.logout(chat_id).await? {
                    LogoutOutcome::LoggedOut => replies::LOGGED_OUT,
                    LogoutOutcome::NotRegistered => replies::NOT_REGISTERED,
                };
                Ok(DispatchOutcome::handled(reply))
            }
            Intent::StartChat => self.start_chat(chat_id).await,
            Intent::EndChat => self.end_chat(chat_id).await,
            Intent::RoleInput(input) => self.role_input(chat_id, &input).await,
            Intent::Chat(text) => self.chat(chat_id, &text).await,
        }
    }

    async fn state(&self, chat_id: &str) -> Result<(Option<Account>, ConversationState), OrchestratorError> {
        let account = account::find_account(self.database.pool(), chat_id).await?;
        let session_active = match &account {
            Some(acct) => session::get_active_session(self.database.pool(), acct.id)
                .await?
                .is_some(),
            None => false,
        };
        let state = ConversationState::derive(account.as_ref(), session_active);
        Ok((account, state))
    }

    async fn start_chat(&self, chat_id: &str) -> Result<DispatchOutcome, OrchestratorError> {
        let (_, state) = self.state(chat_id).await?;
        if let Err(refusal) = state.require_authenticated() {
            return Ok(DispatchOutcome::refused(refusal));
        }
        Ok(DispatchOutcome::handled(replies::role_catalog()))
    }

    async fn end_chat(&self, chat_id: &str) -> Result<DispatchOutcome, OrchestratorError> {
        let Some(acct) = account::find_account(self.database.pool(), chat_id).await? else {
            return Ok(DispatchOutcome::refused(Refusal::NotRegistered));
        };

        if session::end_active_session(self.database.pool(), acct.id).await? {
            info!(chat_id, "Chat ended");
            Ok(DispatchOutcome::handled(replies::CHAT_ENDED))
        } else {
            Ok(DispatchOutcome::handled(replies::NO_ACTIVE_CHAT))
        }
    }

    /// "1" confirms, "0" re-lists, any other number picks that catalog position.
    async fn role_input(&self, chat_id: &str, input: &str) -> Result<DispatchOutcome, OrchestratorError> {
        let (account, state) = self.state(chat_id).await?;
        if let Err(refusal) = state.require_authenticated() {
            return Ok(DispatchOutcome::refused(refusal));
        }

        match input {
            "1" => {
                let confirmed = account.as_ref().and_then(Account::assistant_role);
                Ok(DispatchOutcome::handled(match confirmed {
                    Some(role) => replies::role_confirmed(role),
                    None => replies::SELECT_ROLE_FIRST.to_string(),
                }))
            }
            "0" => Ok(DispatchOutcome::handled(replies::role_catalog())),
            _ => {
                let selected = input.parse::<usize>().ok().and_then(AssistantRole::by_position);
                match selected {
                    Some(role) => {
                        account::set_assistant_role(self.database.pool(), chat_id, role).await?;
                        info!(chat_id, role = %role, "Assistant role selected");
                        Ok(DispatchOutcome::handled(replies::role_selected(role)))
                    }
                    None => Ok(DispatchOutcome::handled(replies::INVALID_SELECTION)),
                }
            }
        }
    }

    async fn chat(&self, chat_id: &str, text: &str) -> Result<DispatchOutcome, OrchestratorError> {
        let (account, state) = self.state(chat_id).await?;
        if let Err(refusal) = state.require_role() {
            return Ok(DispatchOutcome::refused(refusal));
        }
        let Some(account) = account else {
            return Ok(DispatchOutcome::refused(Refusal::NotRegistered));
        };
        if !account.has_quota() {
            return Ok(DispatchOutcome::refused(Refusal::QuotaExceeded));
        }

        let history =
            session::recent_sessions(self.database.pool(), account.id, self.config.history_turns)
                .await?;
        let turns: Vec<Turn<'_>> = history
            .iter()
            .map(|s| Turn {
                user_message: &s.user_message,
                bot_response: &s.bot_response,
            })
            .collect();

        let persona = assistant_description(account.assistant_role.as_deref());
        let messages = build_prompt(&turns, persona, text, self.config.history_turns);
        let max_tokens = u32::try_from(account.token_limit).unwrap_or(DEFAULT_TOKEN_LIMIT as u32);

        let completion = self
            .brain
            .complete(CompletionRequest::new(messages, max_tokens, self.config.temperature))
            .await;

        let answer = match completion {
            Completion::Content(content) => content,
            failed => {
                warn!(chat_id, brain = self.brain.name(), error = %failed, "Completion failed");
                replies::completion_error(&failed.to_string())
            }
        };

        // Nothing is charged until the exchange is recorded; both happen in one transaction.
        let recorded = session::record_exchange_within_quota(
            self.database.pool(),
            account.id,
            Exchange {
                user_message: text,
                bot_response: &answer,
                assistant_role: account.assistant_role.as_deref().unwrap_or_default(),
                system_role: account.system_role().as_str(),
            },
        )
        .await?;
        if recorded.is_none() {
            warn!(chat_id, "Quota used up by a concurrent delivery");
            return Ok(DispatchOutcome::refused(Refusal::QuotaExceeded));
        }

        let updated = account::get_account(self.database.pool(), chat_id).await?;
        info!(
            chat_id,
            remaining = updated.remaining_messages(),
            "Chat message answered"
        );

        Ok(DispatchOutcome::handled(replies::chat_reply(
            &answer,
            updated.remaining_messages(),
        )))
    }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::Help => "help",
        Intent::Login => "login",
        Intent::SubmitPhone(_) => "phone",
        Intent::SubmitOtp(_) => "otp",
        Intent::Logout => "logout",
        Intent::StartChat => "start_chat",
        Intent::EndChat => "end_chat",
        Intent::RoleInput(_) => "role_input",
        Intent::Chat(_) => "chat",
    }
}
