//! Display timestamps for new messages.

use chrono::Local;

/// Source of `HH:mm` timestamps.
pub trait Clock {
    /// Current time formatted as `HH:mm`
    fn now_hhmm(&self) -> String;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_hhmm(&self) -> String {
        Local::now().format("%H:%M").to_string()
    }
}

/// Always reports the same time. Useful in tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(time: impl Into<String>) -> Self {
        Self(time.into())
    }
}

impl Clock for FixedClock {
    fn now_hhmm(&self) -> String {
        self.0.clone()
    }
}
