//! # otp-login (phone and one-time passcode login)
//!
//! `otp_login` implements the customer-facing phone login flow: the user enters
//! a phone number, a CAPTCHA widget supplies a token, the server texts a short
//! numeric code, and the user types or pastes it back to obtain a session.
//!
//! ## Flow
//!
//! 1. **Phone entry:** the phone is sanitized on every keystroke and must match
//!    `^09[0-9]{9}$`. A CAPTCHA token must be present before `/api/login/otp` is
//!    called.
//! 2. **Code entry:** a segmented 5-digit input, a 2 minute countdown, and a
//!    resend control revealed once the countdown expires.
//! 3. **Verification:** `/api/otp/verify` returns the redirect target for the
//!    authenticated session.
//!
//! Rate-limit rejections carry the wait time inside the error text; it is
//! parsed out and rendered as a self-updating countdown in the error region.
//!
//! ## Headless by construction
//!
//! Components own their view state (text, markers, disabled flags) instead of
//! touching a document. Hosts drive them through method calls and render the
//! state however they like; the `otp-login` binary does so on a terminal.

pub mod api;
pub mod cli;
pub mod login;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
