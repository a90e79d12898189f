//! Bounded prompt assembly.

use crate::message::ChatMessage;

/// Number of past exchanges included in a prompt by default.
pub const DEFAULT_HISTORY_TURNS: usize = 5;

/// Instruction appended to every persona description.
pub const ANSWER_INSTRUCTION: &str =
    "شما یک دستیار هوشمند هستید؛ لطفاً ابتدا گام‌به‌گام فکر کنید ولی در نهایت خلاصه و مفید پاسخ دهید.";

/// One past exchange, oldest first when passed to [`build_prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn<'a> {
    pub user_message: &'a str,
    pub bot_response: &'a str,
}

impl<'a> Turn<'a> {
    /// Create a turn.
    pub fn new(user_message: &'a str, bot_response: &'a str) -> Self {
        Self {
            user_message,
            bot_response,
        }
    }
}

/// The system message content for a persona.
pub fn system_prompt(persona_description: &str) -> String {
    format!("{}\n{}", persona_description, ANSWER_INSTRUCTION)
}

/// Build the message list for a completion call.
///
/// Layout: one system message (persona + fixed instruction), then the last
/// `max_turns` turns of `history` as alternating user/assistant messages in
/// chronological order, then `new_message` as the final user message.
pub fn build_prompt(
    history: &[Turn<'_>],
    persona_description: &str,
    new_message: &str,
    max_turns: usize,
) -> Vec<ChatMessage> {
    let skip = history.len().saturating_sub(max_turns);
    let window = &history[skip..];

    let mut messages = Vec::with_capacity(window.len() * 2 + 2);
    messages.push(ChatMessage::system(system_prompt(persona_description)));

    for turn in window {
        messages.push(ChatMessage::user(turn.user_message));
        messages.push(ChatMessage::assistant(turn.bot_response));
    }

    messages.push(ChatMessage::user(new_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn test_prompt_without_history() {
        let messages = build_prompt(&[], "You are a surgeon.", "Hello", 5);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.starts_with("You are a surgeon.\n"));
        assert!(messages[0].content.ends_with(ANSWER_INSTRUCTION));
        assert_eq!(messages[1], ChatMessage::user("Hello"));
    }

    #[test]
    fn test_prompt_interleaves_history() {
        let history = [Turn::new("q1", "a1"), Turn::new("q2", "a2")];
        let messages = build_prompt(&history, "persona", "q3", 5);

        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::User,
                Role::Assistant,
                Role::User
            ]
        );
        assert_eq!(messages[1].content, "q1");
        assert_eq!(messages[4].content, "a2");
        assert_eq!(messages[5].content, "q3");
    }

    #[test]
    fn test_prompt_keeps_most_recent_turns() {
        let owned: Vec<(String, String)> = (0..8)
            .map(|i| (format!("q{}", i), format!("a{}", i)))
            .collect();
        let history: Vec<Turn<'_>> = owned.iter().map(|(q, a)| Turn::new(q, a)).collect();

        let messages = build_prompt(&history, "persona", "now", DEFAULT_HISTORY_TURNS);

        assert_eq!(messages.len(), 1 + DEFAULT_HISTORY_TURNS * 2 + 1);
        assert_eq!(messages[1].content, "q3");
        assert_eq!(messages[messages.len() - 2].content, "a7");
    }

    #[test]
    fn test_zero_turn_window() {
        let history = [Turn::new("q1", "a1")];
        let messages = build_prompt(&history, "persona", "now", 0);
        assert_eq!(messages.len(), 2);
    }
}
