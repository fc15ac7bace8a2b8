//! "Resend code" control. It issues the same send request as the phone form,
//! minus the CAPTCHA token, and reports the outcome to the flow instead of
//! calling back into it.

use super::{
    timer::extract_seconds,
    view::{Button, MessageRegion},
    MSG_NETWORK_ERROR, MSG_PHONE_MISSING, MSG_RESEND_FAILED, SEND_PATH,
};
use crate::api::{AppError, OtpApi, OtpResponse, SendCodeRequest};
use tracing::{debug, error, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResendConfig {
    pub endpoint: String,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            endpoint: SEND_PATH.to_string(),
        }
    }
}

/// What happened when the resend control was triggered.
#[derive(Debug)]
pub enum ResendOutcome {
    /// No phone to send to; the error was shown locally.
    MissingPhone,
    /// Server accepted; the button is hidden again.
    Sent(OtpResponse),
    /// Server asked to wait. Displaying the wait is left to the caller.
    RateLimited { message: String, seconds: u32 },
    /// Server rejected without a wait time; the error was shown locally.
    Rejected(String),
    /// Transport or decoding failure; a generic error was shown locally.
    Failed(AppError),
}

#[derive(Clone, Debug)]
pub struct ResendController {
    config: ResendConfig,
    button: Button,
}

impl ResendController {
    /// The button starts hidden; it is revealed when the code expires.
    #[must_use]
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            button: Button::new(false, false),
        }
    }

    /// Requests a new code for `phone`, writing local errors into `errors`.
    pub async fn trigger<A>(&mut self, api: &A, phone: &str, errors: &mut MessageRegion) -> ResendOutcome
    where
        A: OtpApi + ?Sized,
    {
        if phone.is_empty() {
            errors.show(MSG_PHONE_MISSING);
            return ResendOutcome::MissingPhone;
        }

        self.button.start_loading();
        errors.hide();

        let outcome = match api
            .send_code(&self.config.endpoint, &SendCodeRequest::resend(phone))
            .await
        {
            Ok(reply) if reply.accepted() => {
                debug!("resend accepted");
                self.button.hide();
                ResendOutcome::Sent(reply.body)
            }
            Ok(reply) => {
                let message = reply.error_or(MSG_RESEND_FAILED);
                warn!("resend rejected with status {}", reply.status);

                match extract_seconds(&message).filter(|seconds| *seconds > 0) {
                    Some(seconds) => ResendOutcome::RateLimited { message, seconds },
                    None => {
                        errors.show(message.clone());
                        ResendOutcome::Rejected(message)
                    }
                }
            }
            Err(err) => {
                error!("Resend error: {err}");
                errors.show(MSG_NETWORK_ERROR);
                ResendOutcome::Failed(err)
            }
        };

        self.button.finish_loading(true);

        outcome
    }

    pub fn show_button(&mut self) {
        self.button.show();
    }

    pub fn hide_button(&mut self) {
        self.button.hide();
    }

    #[must_use]
    pub fn button(&self) -> &Button {
        &self.button
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
