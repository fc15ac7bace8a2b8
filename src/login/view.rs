//! View-state primitives. These stand in for the handful of element properties
//! the flow touches: a message's text and visibility, a button's disabled,
//! loading and visible flags.

use super::timer::{Countdown, Tick};

/// Inline message area next to a form, e.g. the phone or code error.
///
/// A region may own one rate-limit countdown that rewrites its text every tick
/// and hides the region at zero. Starting another countdown replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageRegion {
    text: String,
    visible: bool,
    countdown: Option<Countdown>,
}

impl MessageRegion {
    pub fn show(&mut self, message: impl Into<String>) {
        self.text = message.into();
        self.visible = true;
    }

    /// Hides the region. A running countdown keeps ticking and will rewrite the
    /// text, then hide the region again, when it reaches zero.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Shows the rate-limit message and starts its countdown.
    pub fn show_rate_limited(&mut self, seconds: u32) {
        let mut countdown = Countdown::rate_limit();
        countdown.start(seconds);
        self.show(countdown.render());
        self.countdown = Some(countdown);
    }

    pub fn tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };

        match countdown.tick() {
            Tick::Idle => self.countdown = None,
            Tick::Running(_) => self.text = countdown.render(),
            Tick::Expired => {
                self.text = countdown.render();
                self.countdown = None;
                self.hide();
            }
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Seconds left on the region's rate-limit countdown, if one is running.
    #[must_use]
    pub fn rate_limit_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::time_left)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    disabled: bool,
    loading: bool,
    visible: bool,
}

impl Button {
    #[must_use]
    pub fn new(disabled: bool, visible: bool) -> Self {
        Self {
            disabled,
            loading: false,
            visible,
        }
    }

    /// Disables the button and shows its spinner.
    pub fn start_loading(&mut self) {
        self.loading = true;
        self.disabled = true;
    }

    /// Removes the spinner; `enabled` decides whether the button is usable again.
    pub fn finish_loading(&mut self, enabled: bool) {
        self.loading = false;
        self.disabled = !enabled;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}
