//! Request and response payloads for the OTP endpoints. Requests carry the
//! phone number, CAPTCHA token and passcode, so their `Debug` output is
//! redacted and they must never be logged.

use super::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /api/login/otp`. The CAPTCHA token is only sent on the
/// initial request; resends carry the phone alone.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct SendCodeRequest {
    pub phone: String,
    #[serde(
        rename = "cf-turnstile-response",
        skip_serializing_if = "Option::is_none"
    )]
    pub captcha_token: Option<String>,
}

impl SendCodeRequest {
    #[must_use]
    pub fn initial(phone: &str, captcha_token: &str) -> Self {
        Self {
            phone: phone.to_string(),
            captcha_token: Some(captcha_token.to_string()),
        }
    }

    #[must_use]
    pub fn resend(phone: &str) -> Self {
        Self {
            phone: phone.to_string(),
            captcha_token: None,
        }
    }
}

impl fmt::Debug for SendCodeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendCodeRequest")
            .field("phone", &"[redacted]")
            .field("captcha_token", &self.captcha_token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

/// Body of `POST /api/otp/verify`.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct VerifyCodeRequest {
    #[serde(rename = "otp-code")]
    pub code: String,
    pub phone: String,
}

impl fmt::Debug for VerifyCodeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyCodeRequest")
            .field("code", &"[redacted]")
            .field("phone", &"[redacted]")
            .finish()
    }
}

/// Decoded JSON body shared by both endpoints. Every field is optional on the
/// wire, but a present field must have the right type.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct OtpResponse {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Status code plus decoded body of an OTP endpoint call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: OtpResponse,
}

impl ApiReply {
    /// Decodes a raw response body. Anything that is not a JSON object with the
    /// expected field types is a `MalformedResponse`.
    ///
    /// # Errors
    /// Returns `AppError::MalformedResponse` when the body cannot be decoded.
    pub fn decode(status: u16, body: &[u8]) -> Result<Self, AppError> {
        let body = serde_json::from_slice::<OtpResponse>(body).map_err(|err| {
            AppError::MalformedResponse {
                status,
                message: format!("Failed to decode response: {err}"),
            }
        })?;

        Ok(Self { status, body })
    }

    /// A request is accepted only on a 2xx status with `ok: true`.
    #[must_use]
    pub fn accepted(&self) -> bool {
        (200..300).contains(&self.status) && self.body.ok == Some(true)
    }

    /// Server error text, or `fallback` when the body carries none.
    #[must_use]
    pub fn error_or(&self, fallback: &str) -> String {
        match self.body.error.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Redirect target after a successful verification.
    #[must_use]
    pub fn redirect_or(&self, fallback: &str) -> String {
        match self.body.redirect_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn initial_request_carries_captcha_field() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(SendCodeRequest::initial("09123456789", "tok"))?;
        assert_eq!(
            value,
            json!({"phone": "09123456789", "cf-turnstile-response": "tok"})
        );
        Ok(())
    }

    #[test]
    fn resend_request_omits_captcha_field() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(SendCodeRequest::resend("09123456789"))?;
        assert_eq!(value, json!({"phone": "09123456789"}));
        Ok(())
    }

    #[test]
    fn verify_request_uses_hyphenated_code_field() -> Result<(), serde_json::Error> {
        let request = VerifyCodeRequest {
            code: "12345".to_string(),
            phone: "09123456789".to_string(),
        };
        let value = serde_json::to_value(request)?;
        assert_eq!(value, json!({"otp-code": "12345", "phone": "09123456789"}));
        Ok(())
    }

    #[test]
    fn debug_output_is_redacted() {
        let request = SendCodeRequest::initial("09123456789", "secret-token");
        let debug = format!("{request:?}");
        assert!(!debug.contains("09123456789"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn accepted_requires_success_status_and_ok_true() -> Result<(), AppError> {
        assert!(ApiReply::decode(200, br#"{"ok": true}"#)?.accepted());
        assert!(!ApiReply::decode(200, br#"{"ok": false}"#)?.accepted());
        assert!(!ApiReply::decode(200, br#"{}"#)?.accepted());
        assert!(!ApiReply::decode(429, br#"{"ok": true}"#)?.accepted());
        Ok(())
    }

    #[test]
    fn malformed_bodies_are_typed_errors() {
        let bodies: [&[u8]; 4] = [b"<html>bad gateway</html>", b"[1, 2]", br#"{"ok": "yes"}"#, b""];
        for body in bodies {
            let result = ApiReply::decode(502, body);
            assert!(
                matches!(result, Err(AppError::MalformedResponse { status: 502, .. })),
                "expected malformed response for {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn fallbacks_apply_to_missing_or_empty_fields() -> Result<(), AppError> {
        let reply = ApiReply::decode(400, br#"{"error": ""}"#)?;
        assert_eq!(reply.error_or("fallback"), "fallback");

        let reply = ApiReply::decode(200, br#"{"ok": true, "redirect_url": "/dashboard"}"#)?;
        assert_eq!(reply.redirect_or("/account"), "/dashboard");

        let reply = ApiReply::decode(200, br#"{"ok": true}"#)?;
        assert_eq!(reply.redirect_or("/account"), "/account");
        Ok(())
    }
}
