//! Time source.
//!
//! The evaluator never reads the system time itself; the service asks a
//! [`Clock`] once per operation and passes the instant down.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, Local};

/// A source of the current instant, in the employee's local offset.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use attendance_engine::clock::{Clock, FixedClock};
/// use chrono::{DateTime, Duration};
///
/// let clock = FixedClock::new(DateTime::parse_from_rfc3339("2024-01-01T09:00:00+05:30").unwrap());
/// clock.advance(Duration::hours(9));
/// assert_eq!(clock.now().to_rfc3339(), "2024-01-01T18:00:00+05:30");
/// ```
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
