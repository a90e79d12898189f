//! Inbound text classification.
//!
//! Classification is a pure function of the text. The order of the checks in
//! [`classify`] decides ambiguous inputs: a 6-digit string is always a code
//! attempt, an 11-digit `09` string is always a phone number.

use database::validation::{is_otp_code, is_phone_number};

/// Greeting command.
pub const START_COMMAND: &str = "/start";
/// Login command.
pub const LOGIN_COMMAND: &str = "/login";
/// Logout command.
pub const LOGOUT_COMMAND: &str = "/logout";
/// Start-chat command.
pub const START_CHAT_COMMAND: &str = "/startchat";
/// End-chat marker.
pub const END_CHAT_MARKER: &str = "#";

/// What an inbound text asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show help.
    Help,
    /// Begin login.
    Login,
    /// Phone number for login.
    SubmitPhone(String),
    /// One-time code.
    SubmitOtp(String),
    /// Log out.
    Logout,
    /// List the assistant roles.
    StartChat,
    /// End the active chat session.
    EndChat,
    /// Any other all-digit input: confirm, re-list, or pick a role.
    RoleInput(String),
    /// Free text for the assistant.
    Chat(String),
}

/// Map Persian and Arabic-Indic digits to ASCII, leaving everything else alone.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => char::from(b'0' + (c as u32 - 0x06F0) as u8),
            '\u{0660}'..='\u{0669}' => char::from(b'0' + (c as u32 - 0x0660) as u8),
            _ => c,
        })
        .collect()
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Classify an inbound text. First match wins.
pub fn classify(text: &str) -> Intent {
    let trimmed = text.trim();
    let normalized = normalize_digits(trimmed);
    let command = normalized.to_lowercase();

    if command == START_COMMAND {
        Intent::Help
    } else if command == LOGIN_COMMAND {
        Intent::Login
    } else if is_phone_number(&normalized) {
        Intent::SubmitPhone(normalized)
    } else if is_otp_code(&normalized) {
        Intent::SubmitOtp(normalized)
    } else if command == LOGOUT_COMMAND {
        Intent::Logout
    } else if command == START_CHAT_COMMAND {
        Intent::StartChat
    } else if normalized == END_CHAT_MARKER {
        Intent::EndChat
    } else if is_numeric(&normalized) {
        Intent::RoleInput(normalized)
    } else {
        Intent::Chat(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(classify("/start"), Intent::Help);
        assert_eq!(classify("  /LOGIN "), Intent::Login);
        assert_eq!(classify("/Logout"), Intent::Logout);
        assert_eq!(classify("/StartChat"), Intent::StartChat);
        assert_eq!(classify("#"), Intent::EndChat);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            classify("09123456789"),
            Intent::SubmitPhone("09123456789".to_string())
        );
        // Six digits are always a code attempt, even when a role index was meant.
        assert_eq!(classify("123456"), Intent::SubmitOtp("123456".to_string()));
        // Eleven digits without the prefix fall through to role input.
        assert_eq!(
            classify("19123456789"),
            Intent::RoleInput("19123456789".to_string())
        );
        assert_eq!(classify("3"), Intent::RoleInput("3".to_string()));
        assert_eq!(classify("0"), Intent::RoleInput("0".to_string()));
    }

    #[test]
    fn test_chat_keeps_original_text() {
        assert_eq!(
            classify("  I have a headache  "),
            Intent::Chat("I have a headache".to_string())
        );
        assert_eq!(classify("##"), Intent::Chat("##".to_string()));
        assert_eq!(classify("-5"), Intent::Chat("-5".to_string()));
        assert_eq!(classify("/help"), Intent::Chat("/help".to_string()));
    }

    #[test]
    fn test_localized_digits() {
        assert_eq!(normalize_digits("۰۹۱۲"), "0912");
        assert_eq!(normalize_digits("٣٤٥"), "345");
        assert_eq!(normalize_digits("abc ۱"), "abc 1");

        assert_eq!(
            classify("۰۹۱۲۳۴۵۶۷۸۹"),
            Intent::SubmitPhone("09123456789".to_string())
        );
        assert_eq!(classify("۱۲۳۴۵۶"), Intent::SubmitOtp("123456".to_string()));
        assert_eq!(classify("۳"), Intent::RoleInput("3".to_string()));
    }
}
