//! Event streaming handlers

use crate::api::rest::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use wavematch_types::ScanEventEnvelope;

/// Logs the end of a listener's stream, however it ends
struct ListenerGuard;

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        tracing::info!("Event listener disconnected");
    }
}

/// Stream scan events via SSE
///
/// Every message is named after the event (`progress`, `matched_results`,
/// `scan_failed`), carries the scan id as its SSE id, and has the event
/// payload as JSON data.
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_tx.subscribe();
    tracing::info!(
        listeners = state.event_tx.receiver_count(),
        "Event listener connected"
    );

    let stream = stream::unfold((rx, ListenerGuard), |(mut rx, guard)| async move {
        match rx.recv().await {
            Ok(envelope) => Some((Ok(to_sse_event(&envelope)), (rx, guard))),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event listener lagged behind");
                Some((Ok(Event::default().comment("lagged")), (rx, guard)))
            }
            Err(RecvError::Closed) => None,
        }
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn to_sse_event(envelope: &ScanEventEnvelope) -> Event {
    let json = serde_json::to_string(&envelope.event).unwrap_or_default();
    Event::default()
        .event(envelope.event.name())
        .id(envelope.scan_id.as_uuid().to_string())
        .data(json)
}
