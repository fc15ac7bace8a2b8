//! Wire contract for the OTP endpoints: payload types, explicit response
//! decoding, and the network capability the login flow depends on.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{HttpOtpApi, OtpApi, DEFAULT_TIMEOUT};
pub use errors::AppError;
pub use types::{ApiReply, OtpResponse, SendCodeRequest, VerifyCodeRequest};
