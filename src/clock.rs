//! Injectable time source.
//!
//! The only place "now" leaks into compilation is the time-of-day word in the
//! formal greeting. Keeping the clock behind a trait keeps `compile` a pure
//! function in tests.

use chrono::{DateTime, Timelike, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant (for tests).
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Map an instant to the greeting word: morning / afternoon / evening.
pub fn time_of_day_phrase(now: DateTime<Utc>) -> &'static str {
    match now.hour() {
        0..=11 => "morning",
        12..=16 => "afternoon",
        _ => "evening",
    }
}
