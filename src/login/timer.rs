//! Second-resolution countdowns.
//!
//! One abstraction serves both countdowns of the login screen: the code expiry
//! clock rendered as `mm:ss`, and the rate-limit wait rendered into an error
//! message. A countdown does not own a clock; the host calls [`Countdown::tick`]
//! once per second, which keeps it deterministic under test.

use once_cell::sync::Lazy;
use regex::Regex;

/// Wait-time patterns, tried in order; the first match wins.
static WAIT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)([0-9]+)\s*s(?:ec(?:ond)?s?)?",
        r"(?i)in\s+([0-9]+)",
        r"(?i)wait\s+([0-9]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Pulls a wait time in seconds out of a free-text server message, e.g.
/// `"try again in 35s"`, `"wait 45 seconds"` or `"retry in 20"`.
#[must_use]
pub fn extract_seconds(message: &str) -> Option<u32> {
    let digits = WAIT_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(message))
        .and_then(|captures| captures.get(1))?;

    // only overflow can fail here; clamp instead of trying the next pattern
    Some(digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

/// `"Too many requests. Try again in {seconds}s"`
#[must_use]
pub fn rate_limit_message(seconds: u32) -> String {
    format!("Too many requests. Try again in {seconds}s")
}

/// Zero-padded `mm:ss`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPurpose {
    /// Passcode lifetime; expiry reveals the resend control.
    Expiry,
    /// Server-imposed wait; rendered into an error region that hides at zero.
    RateLimit,
}

/// Result of advancing a countdown by one second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Not running; nothing changed.
    Idle,
    /// Still running with this many seconds left.
    Running(u32),
    /// Reached zero on this tick. Reported exactly once per `start`.
    Expired,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    purpose: CountdownPurpose,
    remaining: u32,
    running: bool,
    visible: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(purpose: CountdownPurpose) -> Self {
        Self {
            purpose,
            remaining: 0,
            running: false,
            visible: false,
        }
    }

    #[must_use]
    pub fn expiry() -> Self {
        Self::new(CountdownPurpose::Expiry)
    }

    #[must_use]
    pub fn rate_limit() -> Self {
        Self::new(CountdownPurpose::RateLimit)
    }

    /// Restarts the countdown, cancelling any run in progress, and shows it.
    pub fn start(&mut self, seconds: u32) {
        self.stop();
        self.remaining = seconds;
        self.running = true;
        self.visible = true;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.stop();
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.visible = false;
    }

    /// Current text for the countdown's display.
    #[must_use]
    pub fn render(&self) -> String {
        match self.purpose {
            CountdownPurpose::Expiry => format_clock(self.remaining),
            CountdownPurpose::RateLimit => rate_limit_message(self.remaining),
        }
    }

    #[must_use]
    pub fn purpose(&self) -> CountdownPurpose {
        self.purpose
    }

    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_seconds_suffix_forms() {
        assert_eq!(extract_seconds("35s"), Some(35));
        assert_eq!(extract_seconds("try again in 35s"), Some(35));
        assert_eq!(extract_seconds("Please wait 45 seconds"), Some(45));
        assert_eq!(extract_seconds("retry after 12sec"), Some(12));
        assert_eq!(extract_seconds("RETRY AFTER 7 SECONDS"), Some(7));
    }

    #[test]
    fn extract_seconds_falls_back_to_in_and_wait() {
        assert_eq!(extract_seconds("in 45"), Some(45));
        assert_eq!(extract_seconds("wait 9"), Some(9));
    }

    #[test]
    fn extract_seconds_first_pattern_wins() {
        // "in 10" would match the second pattern, but "30s" matches the first.
        assert_eq!(extract_seconds("in 10 minutes or 30s"), Some(30));
    }

    #[test]
    fn extract_seconds_overflow_saturates_in_first_match() {
        assert_eq!(extract_seconds("retry in 7 or 99999999999s"), Some(u32::MAX));
    }

    #[test]
    fn wait_patterns_all_compile() {
        assert_eq!(WAIT_PATTERNS.len(), 3);
    }

    #[test]
    fn extract_seconds_none_without_digits() {
        assert_eq!(extract_seconds("no wait here"), None);
        assert_eq!(extract_seconds(""), None);
        assert_eq!(extract_seconds("Invalid phone number"), None);
        assert_eq!(extract_seconds("wait ۳۵ seconds"), None);
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(120), "02:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(0), "00:00");
    }

    #[test]
    fn start_renders_immediately_then_ticks() {
        let mut timer = Countdown::expiry();
        timer.start(125);
        assert!(timer.is_running());
        assert!(timer.is_visible());
        assert_eq!(timer.render(), "02:05");

        assert_eq!(timer.tick(), Tick::Running(124));
        assert_eq!(timer.render(), "02:04");
    }

    #[test]
    fn expires_exactly_once() {
        let mut timer = Countdown::expiry();
        timer.start(2);
        assert_eq!(timer.tick(), Tick::Running(1));
        assert_eq!(timer.tick(), Tick::Expired);
        assert!(!timer.is_running());
        assert!(!timer.is_visible());
        assert_eq!(timer.render(), "00:00");

        for _ in 0..5 {
            assert_eq!(timer.tick(), Tick::Idle);
        }
        assert_eq!(timer.time_left(), 0);
    }

    #[test]
    fn restart_cancels_previous_run() {
        let mut timer = Countdown::expiry();
        timer.start(3);
        timer.tick();
        timer.start(120);
        assert_eq!(timer.time_left(), 120);
        assert_eq!(timer.render(), "02:00");
    }

    #[test]
    fn stop_is_idempotent() {
        let mut timer = Countdown::expiry();
        timer.stop();
        timer.start(10);
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert!(!timer.is_visible());
        assert_eq!(timer.tick(), Tick::Idle);
    }

    #[test]
    fn rate_limit_renders_message() {
        let mut countdown = Countdown::rate_limit();
        countdown.start(3);
        assert_eq!(countdown.purpose(), CountdownPurpose::RateLimit);
        assert_eq!(countdown.render(), "Too many requests. Try again in 3s");
        countdown.tick();
        assert_eq!(countdown.render(), "Too many requests. Try again in 2s");
    }
}
