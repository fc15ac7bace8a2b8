//! CAPTCHA widget capability. The widget runs its own challenge; the flow only
//! receives its events and may ask it to reset.

/// Events the widget reports to the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptchaEvent {
    /// Challenge solved; carries the proof token.
    Token(String),
    /// Challenge failed to load or run.
    Error,
    /// A previously issued token expired.
    Expired,
}

/// Control surface of the widget, passed into the flow at construction.
pub trait CaptchaWidget {
    /// Discards the current token and shows a fresh challenge.
    fn reset(&mut self);
}

/// Widget for hosts that obtain the token out of band and have nothing to
/// reset, e.g. a token supplied on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedCaptcha;

impl CaptchaWidget for DetachedCaptcha {
    fn reset(&mut self) {}
}
