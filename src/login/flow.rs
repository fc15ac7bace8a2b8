//! Login orchestrator.
//!
//! ```text
//!  PhoneEntry --(valid phone, token, send accepted)--> CodeEntry
//!  CodeEntry  --(5 digits, verify accepted)----------> Redirected(target)
//!  CodeEntry  --(back)-------------------------------> PhoneEntry
//! ```
//!
//! Every other event keeps the current screen and updates its view state.
//! Request methods take `&mut self`, so a second submission cannot start while
//! one is in flight.

use super::{
    captcha::{CaptchaEvent, CaptchaWidget},
    code_input::CodeInput,
    phone::{is_valid_phone, sanitize_phone},
    resend::{ResendConfig, ResendController, ResendOutcome},
    timer::{extract_seconds, Countdown, Tick},
    view::{Button, MessageRegion},
    CODE_LENGTH, CODE_TTL_SECS, DEFAULT_REDIRECT, MSG_CAPTCHA_FAILED, MSG_CAPTCHA_REQUIRED,
    MSG_INVALID_CODE, MSG_INVALID_PHONE, MSG_SEND_FAILED, SEND_PATH, SUBTITLE_PHONE, VERIFY_PATH,
};
use crate::api::{OtpApi, SendCodeRequest, VerifyCodeRequest};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowConfig {
    pub send_path: String,
    pub verify_path: String,
    pub code_length: usize,
    /// Seconds before the resend control is revealed.
    pub code_ttl: u32,
    /// Used when the verify response carries no `redirect_url`.
    pub default_redirect: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            send_path: SEND_PATH.to_string(),
            verify_path: VERIFY_PATH.to_string(),
            code_length: CODE_LENGTH,
            code_ttl: CODE_TTL_SECS,
            default_redirect: DEFAULT_REDIRECT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    PhoneEntry,
    CodeEntry,
    /// Terminal: the host should navigate to this target.
    Redirected(String),
}

/// Which inline message region an error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Region {
    Phone,
    Code,
}

pub struct LoginFlow<A, C> {
    api: A,
    captcha: C,
    config: FlowConfig,
    screen: Screen,
    captcha_token: Option<SecretString>,
    phone: String,
    subtitle: String,
    send_button: Button,
    verify_button: Button,
    phone_error: MessageRegion,
    otp_error: MessageRegion,
    code_input: CodeInput,
    timer: Countdown,
    resend: ResendController,
}

impl<A, C> LoginFlow<A, C>
where
    A: OtpApi,
    C: CaptchaWidget,
{
    #[must_use]
    pub fn new(api: A, captcha: C, config: FlowConfig) -> Self {
        let resend = ResendController::new(ResendConfig {
            endpoint: config.send_path.clone(),
        });

        Self {
            api,
            captcha,
            code_input: CodeInput::new(config.code_length),
            config,
            screen: Screen::PhoneEntry,
            captcha_token: None,
            phone: String::new(),
            subtitle: SUBTITLE_PHONE.to_string(),
            send_button: Button::new(true, true),
            verify_button: Button::new(false, true),
            phone_error: MessageRegion::default(),
            otp_error: MessageRegion::default(),
            timer: Countdown::expiry(),
            resend,
        }
    }

    /// Phone field `input` event; the stored value is sanitized.
    pub fn input_phone(&mut self, raw: &str) {
        self.phone = sanitize_phone(raw);
    }

    pub fn handle_captcha(&mut self, event: CaptchaEvent) {
        match event {
            CaptchaEvent::Token(token) => {
                debug!("captcha solved");
                self.captcha_token = Some(SecretString::from(token));
                self.send_button.set_disabled(false);
            }
            CaptchaEvent::Error => {
                warn!("captcha failed");
                self.captcha_token = None;
                self.send_button.set_disabled(true);
                self.phone_error.show(MSG_CAPTCHA_FAILED);
            }
            CaptchaEvent::Expired => {
                debug!("captcha token expired");
                self.captcha_token = None;
                self.send_button.set_disabled(true);
            }
        }
    }

    /// Phone form submission.
    pub async fn submit_phone(&mut self) {
        if self.screen != Screen::PhoneEntry {
            return;
        }

        let phone = self.phone.trim().to_string();

        if !is_valid_phone(&phone) {
            self.phone_error.show(MSG_INVALID_PHONE);
            return;
        }

        let Some(token) = self.captcha_token.as_ref() else {
            self.phone_error.show(MSG_CAPTCHA_REQUIRED);
            return;
        };
        let request = SendCodeRequest::initial(&phone, token.expose_secret());

        self.send_button.start_loading();
        self.phone_error.hide();

        match self.api.send_code(&self.config.send_path, &request).await {
            Ok(reply) if reply.accepted() => {
                info!("code sent");
                self.switch_to_code_entry();
            }
            Ok(reply) => {
                warn!("send rejected with status {}", reply.status);
                let message = reply.error_or(MSG_SEND_FAILED);
                self.show_rejection(Region::Phone, message);
            }
            Err(err) => {
                error!("Phone submit error: {err}");
                self.phone_error.show(err.user_message());
            }
        }

        self.send_button
            .finish_loading(self.captcha_token.is_some());
    }

    /// Code form submission. Returns the redirect target once the server
    /// accepts the code.
    pub async fn submit_code(&mut self) -> Option<String> {
        if self.screen != Screen::CodeEntry {
            return None;
        }

        let code = self.code_input.value();

        if code.chars().count() != self.config.code_length {
            self.otp_error.show(format!(
                "Please enter the complete {}-digit code",
                self.config.code_length
            ));
            self.code_input.set_error();
            return None;
        }

        self.verify_button.start_loading();
        self.otp_error.hide();

        let request = VerifyCodeRequest {
            code,
            phone: self.phone.trim().to_string(),
        };

        let mut redirect = None;

        match self.api.verify_code(&self.config.verify_path, &request).await {
            Ok(reply) if reply.accepted() => {
                let target = reply.redirect_or(&self.config.default_redirect);
                info!("code verified, redirecting to {target}");
                self.timer.stop();
                self.screen = Screen::Redirected(target.clone());
                redirect = Some(target);
            }
            Ok(reply) => {
                warn!("verify rejected with status {}", reply.status);
                self.otp_error.show(reply.error_or(MSG_INVALID_CODE));
                self.code_input.set_error();
                self.code_input.clear();
            }
            Err(err) => {
                error!("OTP verify error: {err}");
                self.otp_error.show(err.user_message());
                self.code_input.set_error();
            }
        }

        self.verify_button.finish_loading(true);

        redirect
    }

    /// Resend control activation.
    pub async fn resend(&mut self) {
        if self.screen != Screen::CodeEntry {
            return;
        }

        let outcome = self
            .resend
            .trigger(&self.api, &self.phone, &mut self.otp_error)
            .await;

        match outcome {
            ResendOutcome::Sent(_) => {
                self.timer.start(self.config.code_ttl);
                self.code_input.clear();
                self.code_input.focus();
            }
            ResendOutcome::RateLimited { seconds, .. } => {
                self.show_rate_limited(Region::Code, seconds);
            }
            ResendOutcome::MissingPhone
            | ResendOutcome::Rejected(_)
            | ResendOutcome::Failed(_) => {}
        }
    }

    /// "Back" control: return to phone entry and reset the CAPTCHA widget.
    pub fn back(&mut self) {
        if self.screen != Screen::CodeEntry {
            return;
        }

        debug!("back to phone entry");
        self.screen = Screen::PhoneEntry;
        self.subtitle = SUBTITLE_PHONE.to_string();
        self.timer.stop();
        self.otp_error.hide();
        self.phone_error.hide();

        self.captcha.reset();
        self.captcha_token = None;
        self.send_button.set_disabled(true);
    }

    /// Advances every countdown by one second; the host calls this once per
    /// second. Expiry of the code countdown reveals the resend control.
    pub fn tick(&mut self) -> Tick {
        let tick = self.timer.tick();

        if tick == Tick::Expired {
            debug!("code expired, resend available");
            self.resend.show_button();
        }

        self.phone_error.tick();
        self.otp_error.tick();

        tick
    }

    fn switch_to_code_entry(&mut self) {
        self.screen = Screen::CodeEntry;
        self.subtitle = format!("Code sent to {}", self.phone);
        self.code_input.clear();
        self.code_input.focus();
        self.timer.start(self.config.code_ttl);
    }

    /// Shows a server rejection, turning an embedded wait time into a
    /// rate-limit countdown.
    fn show_rejection(&mut self, region: Region, message: String) {
        match extract_seconds(&message).filter(|seconds| *seconds > 0) {
            Some(seconds) => self.show_rate_limited(region, seconds),
            None => self.region_mut(region).show(message),
        }
    }

    fn show_rate_limited(&mut self, region: Region, seconds: u32) {
        self.region_mut(region).show_rate_limited(seconds);
    }

    fn region_mut(&mut self, region: Region) -> &mut MessageRegion {
        match region {
            Region::Phone => &mut self.phone_error,
            Region::Code => &mut self.otp_error,
        }
    }

    /// Host access to the code input for keyboard, input and paste events.
    pub fn code_input_mut(&mut self) -> &mut CodeInput {
        &mut self.code_input
    }

    #[must_use]
    pub fn code_input(&self) -> &CodeInput {
        &self.code_input
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn has_captcha_token(&self) -> bool {
        self.captcha_token.is_some()
    }

    #[must_use]
    pub fn phone_error(&self) -> &MessageRegion {
        &self.phone_error
    }

    #[must_use]
    pub fn otp_error(&self) -> &MessageRegion {
        &self.otp_error
    }

    #[must_use]
    pub fn send_button(&self) -> &Button {
        &self.send_button
    }

    #[must_use]
    pub fn verify_button(&self) -> &Button {
        &self.verify_button
    }

    #[must_use]
    pub fn resend_button(&self) -> &Button {
        self.resend.button()
    }

    #[must_use]
    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    /// Countdown text while the code countdown is visible.
    #[must_use]
    pub fn timer_display(&self) -> Option<String> {
        self.timer.is_visible().then(|| self.timer.render())
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn captcha(&self) -> &C {
        &self.captcha
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}
