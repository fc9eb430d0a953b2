//! Countdown endpoints: a JSON snapshot and a server-sent event stream.

use std::convert::Infallible;

use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::{Stream, StreamExt};
use steamoff_core::Countdown;

use crate::state::AppState;
use crate::ticker::{self, TICK_PERIOD};

/// Current time remaining until the event.
pub async fn countdown_snapshot(State(state): State<AppState>) -> Json<Countdown> {
    Json(state.config.event.remaining_now())
}

/// One `tick` event per second until the event starts, then the stream ends.
pub async fn countdown_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = ticker::countdown_stream(state.config.event, TICK_PERIOD).map(|countdown| {
        let event = Event::default()
            .event("tick")
            .json_data(countdown)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to encode countdown tick");
                Event::default().event("tick")
            });
        Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
