//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of digits the phone field accepts.
pub const PHONE_MAX_DIGITS: usize = 11;

// Mobile numbers: "09" followed by nine digits
static MOBILE_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^09[0-9]{9}$").ok());

/// Check if a phone number can be submitted
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    MOBILE_REGEX
        .as_ref()
        .is_some_and(|re| re.is_match(phone.trim()))
}

/// Strip everything but digits and cap the length, applied on every keystroke
#[must_use]
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect()
}
