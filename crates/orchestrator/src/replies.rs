//! User-facing reply texts, in Persian.

use database::{AssistantRole, ASSISTANT_ROLES};

/// Help text shown for `/start`.
pub const HELP_TEXT: &str = "به ربات خوش آمدید!

برای ورود دستور /login را وارد کنید.
اگر قبلاً وارد شده‌اید، می‌توانید دستور /startchat را برای شروع مکالمه وارد کنید.

راهنما:
/login - شروع فرآیند ورود
/logout - خروج از سیستم
/startchat - انتخاب دستیار و شروع چت (پس از ورود)
# - پایان چت فعلی";

pub const ASK_PHONE: &str = "لطفاً شماره موبایل خود را وارد کنید (مثلاً 09123456789).";
pub const CODE_SENT: &str = "کد تأیید برای شماره موبایل شما ارسال شد. لطفاً کد را وارد کنید.";
pub const CODE_DELIVERY_FAILED: &str = "خطایی در ارسال کد تأیید رخ داد. لطفاً دوباره تلاش کنید.";
pub const PHONE_TAKEN: &str = "این شماره موبایل قبلاً برای حساب دیگری ثبت شده است.";
pub const LOGIN_SUCCEEDED: &str = "احراز هویت موفق بود! اکنون می‌توانید از خدمات استفاده کنید.";
pub const INVALID_CODE: &str = "کد واردشده نامعتبر است. لطفاً دوباره تلاش کنید.";
pub const LOGGED_OUT: &str = "شما با موفقیت از سیستم خارج شدید.";

pub const NOT_REGISTERED: &str = "شما هنوز ثبت‌نام نکرده‌اید. لطفاً ابتدا دستور /login را وارد کنید.";
pub const LOGIN_REQUIRED: &str = "ابتدا باید وارد شوید. لطفاً دستور /login را وارد کنید.";
pub const NO_ROLE: &str = "شما هنوز نقشی انتخاب نکرده‌اید. دستور /startchat را ارسال کنید.";
pub const QUOTA_EXCEEDED: &str = "شما به حد پیام روزانه خود رسیده‌اید. لطفاً فردا دوباره تلاش کنید.";

pub const SELECT_ROLE_FIRST: &str = "ابتدا باید نقش را انتخاب کنید. دستور /startchat را بزنید.";
pub const INVALID_SELECTION: &str = "شماره واردشده نامعتبر است. لطفاً شماره‌ای از لیست ارسال کنید.";

pub const CHAT_ENDED: &str = "چت شما پایان یافت. برای شروع چت جدید دستور /startchat را ارسال کنید.";
pub const NO_ACTIVE_CHAT: &str = "شما در حال حاضر چت فعالی ندارید.";

/// Closing line of every chat reply.
pub const END_CHAT_HINT: &str = "برای پایان چت علامت # را ارسال کنید.";

/// Numbered list of assistant roles.
pub fn role_catalog() -> String {
    let list = ASSISTANT_ROLES
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry.label))
        .collect::<Vec<_>>()
        .join("\n");

    format!("لطفاً یکی از نقش‌های زیر را انتخاب کنید:\n{}\n\nشماره مورد نظر را وارد کنید.", list)
}

pub fn role_selected(role: AssistantRole) -> String {
    format!(
        "نقش انتخاب‌شده: {}\nبرای تأیید عدد 1 را ارسال کنید یا برای انتخاب مجدد عدد 0.",
        role.label()
    )
}

pub fn role_confirmed(role: AssistantRole) -> String {
    format!(
        "نقش «{}» تأیید شد.\nاکنون می‌توانید چت را آغاز کنید.\nپیام خود را ارسال کنید و برای پایان چت علامت # را ارسال نمایید.",
        role.label()
    )
}

/// Answer text when the completion provider failed.
pub fn completion_error(detail: &str) -> String {
    format!("خطایی رخ داد: {}", detail)
}

/// Line reporting how many messages are left today.
pub fn remaining_line(remaining: i64) -> String {
    format!("پیام‌های باقی‌مانده امروز شما: {}", remaining)
}

/// Chat reply with the remaining quota footer.
pub fn chat_reply(answer: &str, remaining: i64) -> String {
    format!("{}\n\n{}\n{}", answer, remaining_line(remaining), END_CHAT_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_catalog_is_numbered_from_one() {
        let text = role_catalog();
        assert!(text.contains("1. پزشک عمومی"));
        assert!(text.contains(&format!("{}. متخصص ارتوپدی", AssistantRole::count())));
    }

    #[test]
    fn test_help_lists_commands() {
        for command in ["/login", "/logout", "/startchat", "#"] {
            assert!(HELP_TEXT.contains(command));
        }
    }

    #[test]
    fn test_chat_reply_format() {
        assert_eq!(
            chat_reply("آب بنوشید.", 22),
            "آب بنوشید.\n\nپیام‌های باقی‌مانده امروز شما: 22\nبرای پایان چت علامت # را ارسال کنید."
        );
    }
}
