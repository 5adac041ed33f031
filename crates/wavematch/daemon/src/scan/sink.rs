//! Broadcast-backed event sink

use tokio::sync::broadcast;
use wavematch_engine::EventSink;
use wavematch_types::{ScanEvent, ScanEventEnvelope, ScanId};

/// Publishes a scan's events to every current listener.
///
/// With no listener attached the event is dropped.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    scan_id: ScanId,
    tx: broadcast::Sender<ScanEventEnvelope>,
}

impl BroadcastSink {
    pub fn new(scan_id: ScanId, tx: broadcast::Sender<ScanEventEnvelope>) -> Self {
        Self { scan_id, tx }
    }
}

impl EventSink for BroadcastSink {
    fn emit(&mut self, event: ScanEvent) {
        let name = event.name();
        if self
            .tx
            .send(ScanEventEnvelope::new(self.scan_id, event))
            .is_err()
        {
            tracing::trace!(scan_id = %self.scan_id, event = name, "No listeners, event dropped");
        }
    }
}
