//! Phone/OTP login flow.
//!
//! [`LoginFlow`] owns the two screens (phone entry and code entry) and
//! mediates between the CAPTCHA token, the send and verify requests, the
//! expiry countdown, the segmented code input and the resend control.
//! Everything it touches is owned view state; capabilities (network, CAPTCHA
//! widget) are passed in at construction.

pub mod captcha;
pub mod code_input;
pub mod flow;
pub mod phone;
pub mod resend;
pub mod timer;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use captcha::{CaptchaEvent, CaptchaWidget, DetachedCaptcha};
pub use code_input::{CodeInput, Key, KeyOutcome};
pub use flow::{FlowConfig, LoginFlow, Screen};
pub use resend::{ResendConfig, ResendController, ResendOutcome};
pub use timer::{extract_seconds, Countdown, CountdownPurpose, Tick};
pub use view::{Button, MessageRegion};

pub const SEND_PATH: &str = "/api/login/otp";
pub const VERIFY_PATH: &str = "/api/otp/verify";
pub const DEFAULT_REDIRECT: &str = "/account";
pub const CODE_LENGTH: usize = 5;
/// Lifetime of a texted code, in seconds.
pub const CODE_TTL_SECS: u32 = 120;

pub(crate) const MSG_INVALID_PHONE: &str = "Please enter a valid phone number starting with 09";
pub(crate) const MSG_CAPTCHA_REQUIRED: &str = "Please complete the verification";
pub(crate) const MSG_CAPTCHA_FAILED: &str = "Verification failed. Please refresh the page.";
pub(crate) const MSG_SEND_FAILED: &str = "Failed to send code. Please try again.";
pub(crate) const MSG_INVALID_CODE: &str = "Invalid code. Please try again.";
pub(crate) const MSG_RESEND_FAILED: &str = "Failed to resend code";
pub(crate) const MSG_PHONE_MISSING: &str = "Phone number is missing";
pub(crate) const MSG_NETWORK_ERROR: &str = "Network error. Please try again.";

pub(crate) const SUBTITLE_PHONE: &str = "Enter your phone number to continue";
