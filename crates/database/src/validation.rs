//! Input validation for account fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Phone number is not a national mobile number.
    InvalidPhoneNumber(String),
    /// One-time code has the wrong shape.
    InvalidOtp(String),
    /// Numeric value outside its allowed range.
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },
    /// Empty value where one is required.
    Empty(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPhoneNumber(msg) => write!(f, "Invalid phone number: {}", msg),
            ValidationError::InvalidOtp(msg) => write!(f, "Invalid code: {}", msg),
            ValidationError::OutOfRange {
                field,
                min,
                max,
                actual,
            } => write!(f, "{} must be between {} and {} (got {})", field, min, max, actual),
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Length of a national mobile number, prefix included.
pub const PHONE_NUMBER_LENGTH: usize = 11;

/// Fixed national mobile prefix.
pub const PHONE_NUMBER_PREFIX: &str = "09";

/// Length of a one-time code.
pub const OTP_LENGTH: usize = 6;

/// Smallest response token limit an account may carry.
pub const MIN_TOKEN_LIMIT: i64 = 300;

/// Largest response token limit an account may carry.
pub const MAX_TOKEN_LIMIT: i64 = 1000;

/// Default daily message cap for new accounts.
pub const DEFAULT_DAILY_MESSAGE_LIMIT: i64 = 23;

/// Default response token limit for new accounts.
pub const DEFAULT_TOKEN_LIMIT: i64 = 300;

fn all_ascii_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `value` looks like a national mobile number (`09` + 9 digits).
pub fn is_phone_number(value: &str) -> bool {
    value.len() == PHONE_NUMBER_LENGTH
        && all_ascii_digits(value)
        && value.starts_with(PHONE_NUMBER_PREFIX)
}

/// Whether `value` looks like a one-time code.
pub fn is_otp_code(value: &str) -> bool {
    value.len() == OTP_LENGTH && all_ascii_digits(value)
}

/// Validate a phone number before storing it.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Empty("phone number".to_string()));
    }

    if !all_ascii_digits(phone) {
        return Err(ValidationError::InvalidPhoneNumber(
            "must contain digits only".to_string(),
        ));
    }

    if phone.len() != PHONE_NUMBER_LENGTH {
        return Err(ValidationError::InvalidPhoneNumber(format!(
            "must be {} digits",
            PHONE_NUMBER_LENGTH
        )));
    }

    if !phone.starts_with(PHONE_NUMBER_PREFIX) {
        return Err(ValidationError::InvalidPhoneNumber(format!(
            "must start with {}",
            PHONE_NUMBER_PREFIX
        )));
    }

    Ok(())
}

/// Validate a one-time code.
pub fn validate_otp(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::Empty("code".to_string()));
    }

    if !is_otp_code(code) {
        return Err(ValidationError::InvalidOtp(format!(
            "must be {} digits",
            OTP_LENGTH
        )));
    }

    Ok(())
}

/// Validate a per-account response token limit.
pub fn validate_token_limit(limit: i64) -> Result<(), ValidationError> {
    if !(MIN_TOKEN_LIMIT..=MAX_TOKEN_LIMIT).contains(&limit) {
        return Err(ValidationError::OutOfRange {
            field: "token limit".to_string(),
            min: MIN_TOKEN_LIMIT,
            max: MAX_TOKEN_LIMIT,
            actual: limit,
        });
    }
    Ok(())
}

/// Validate a daily message cap.
pub fn validate_daily_limit(limit: i64) -> Result<(), ValidationError> {
    if limit < 1 {
        return Err(ValidationError::OutOfRange {
            field: "daily message limit".to_string(),
            min: 1,
            max: i64::MAX,
            actual: limit,
        });
    }
    Ok(())
}

/// Mask a phone number for logs, keeping the prefix and the last two digits.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phone_numbers() {
        assert!(validate_phone_number("09123456789").is_ok());
        assert!(validate_phone_number(" 09350000000 ").is_ok());
        assert!(is_phone_number("09123456789"));
    }

    #[test]
    fn test_invalid_phone_numbers() {
        assert!(matches!(
            validate_phone_number(""),
            Err(ValidationError::Empty(_))
        ));
        assert!(matches!(
            validate_phone_number("0912345678"),
            Err(ValidationError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            validate_phone_number("19123456789"),
            Err(ValidationError::InvalidPhoneNumber(_))
        ));
        assert!(matches!(
            validate_phone_number("0912345678a"),
            Err(ValidationError::InvalidPhoneNumber(_))
        ));
        assert!(!is_phone_number("+989123456789"));
    }

    #[test]
    fn test_otp_shape() {
        assert!(validate_otp("123456").is_ok());
        assert!(is_otp_code("000000"));
        assert!(!is_otp_code("12345"));
        assert!(!is_otp_code("1234567"));
        assert!(!is_otp_code("12a456"));
        assert!(matches!(validate_otp(""), Err(ValidationError::Empty(_))));
    }

    #[test]
    fn test_token_limit_bounds() {
        assert!(validate_token_limit(300).is_ok());
        assert!(validate_token_limit(1000).is_ok());
        assert!(validate_token_limit(299).is_err());
        assert!(validate_token_limit(1001).is_err());
    }

    #[test]
    fn test_daily_limit_positive() {
        assert!(validate_daily_limit(1).is_ok());
        assert!(validate_daily_limit(0).is_err());
        assert!(validate_daily_limit(-5).is_err());
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("09123456789"), "09*******89");
        assert_eq!(mask_phone("123"), "***");
    }
}
