//! Countdown to the event start.
//!
//! The countdown is a pure function of "now" and a fixed target instant. It is
//! recomputed by the caller on a fixed interval (see the site's ticker); once the
//! target has passed every component is clamped to zero and the countdown is
//! marked finished so callers can stop ticking.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Time remaining until the event, broken down into display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// True once `now >= target`. No further updates are needed after this.
    pub finished: bool,
}

impl Countdown {
    /// The zeroed, finished countdown.
    pub const FINISHED: Countdown = Countdown {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        finished: true,
    };

    /// Break `target - now` down into whole days, hours, minutes and seconds.
    ///
    /// Sub-second remainders are floored. When `now >= target` the result is
    /// [`Countdown::FINISHED`].
    pub fn between(now: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        let millis = (target - now).num_milliseconds();
        if millis <= 0 {
            return Self::FINISHED;
        }

        let total = (millis / 1000) as u64;
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
            finished: false,
        }
    }

    /// Whether the target instant has been reached.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total whole seconds represented by the components.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

/// The fixed instant the countdown runs towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventClock {
    target: DateTime<Utc>,
}

impl EventClock {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Parse an RFC 3339 timestamp such as `2025-03-06T12:00:00Z`.
    pub fn parse(value: &str) -> Result<Self> {
        let target = DateTime::parse_from_rfc3339(value.trim())
            .map_err(|e| Error::InvalidTimestamp {
                value: value.to_string(),
                reason: e.to_string(),
            })?
            .with_timezone(&Utc);
        Ok(Self { target })
    }

    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Countdown as seen at `now`.
    pub fn remaining(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::between(now, self.target)
    }

    /// Countdown as seen by the wall clock.
    pub fn remaining_now(&self) -> Countdown {
        self.remaining(Utc::now())
    }
}

impl Default for EventClock {
    fn default() -> Self {
        // The constant is a valid RFC 3339 literal; fall back to the epoch only
        // to keep this infallible.
        Self::parse(crate::EVENT_START_RFC3339).unwrap_or(Self {
            target: DateTime::<Utc>::UNIX_EPOCH,
        })
    }
}
