//! Once-per-second countdown stream.
//!
//! Each tick re-derives the remaining time from the wall clock, so a delayed
//! or skipped tick never makes the countdown drift. The stream yields the
//! finished (all-zero) value once and then ends.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt};
use steamoff_core::{Countdown, EventClock};
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Default refresh period for live countdowns.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Stream of countdown values for `clock`, one per `period`.
pub fn countdown_stream(clock: EventClock, period: Duration) -> impl Stream<Item = Countdown> {
    countdown_stream_with(clock, period, Utc::now)
}

/// Like [`countdown_stream`], reading the current time from `now`.
pub fn countdown_stream_with<F>(
    clock: EventClock,
    period: Duration,
    now: F,
) -> impl Stream<Item = Countdown>
where
    F: Fn() -> DateTime<Utc> + Send + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    IntervalStream::new(interval).scan(false, move |done, _| {
        if *done {
            return futures::future::ready(None);
        }
        let remaining = clock.remaining(now());
        *done = remaining.is_finished();
        futures::future::ready(Some(remaining))
    })
}
