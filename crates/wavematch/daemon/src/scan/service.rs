//! Scan submission and background workers

use super::sink::BroadcastSink;
use crate::storage::{stored_path, ChannelStore};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinError;
use wavematch_engine::{plan_scan, EngineResult, PreparedScan, ScanPlan};
use wavematch_types::{
    ChannelDescriptor, ChannelSeries, MatchingParams, ReferenceWaveform, ScanBounds, ScanEvent,
    ScanEventEnvelope, ScanId,
};

/// A scan as submitted by a client
#[derive(Debug, Clone, Deserialize)]
pub struct ScanRequest {
    #[serde(rename = "selectedChannels")]
    pub channels: Vec<ChannelDescriptor>,

    #[serde(rename = "actualPoints")]
    pub reference: ReferenceWaveform,

    #[serde(flatten)]
    pub bounds: ScanBounds,
}

/// Synchronous answer to a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAck {
    /// A worker is running; events carry `scan_id`
    Started { scan_id: ScanId, total_tasks: u64 },
    /// No segment of any channel could hold a window
    NothingToProcess,
}

/// Accepts scans and runs each on its own blocking worker
pub struct ScanService {
    store: Arc<dyn ChannelStore>,
    event_tx: broadcast::Sender<ScanEventEnvelope>,
    params: MatchingParams,
}

impl ScanService {
    pub fn new(
        store: Arc<dyn ChannelStore>,
        event_tx: broadcast::Sender<ScanEventEnvelope>,
        params: MatchingParams,
    ) -> Self {
        Self {
            store,
            event_tx,
            params,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScanEventEnvelope> {
        self.event_tx.subscribe()
    }

    /// Validate, load, and plan a scan, starting a worker when there is
    /// work to do.
    ///
    /// Returns as soon as the worker is spawned; progress and results
    /// arrive on the event channel.
    pub async fn submit(&self, request: ScanRequest) -> EngineResult<ScanAck> {
        request.reference.validate()?;
        request.bounds.validate()?;

        let channels = self.resolve_channels(&request.channels).await;
        let plan = plan_scan(&request.reference, channels, request.bounds, self.params)?;

        match plan {
            ScanPlan::NothingToProcess => {
                tracing::info!(
                    channels = request.channels.len(),
                    "Scan has no data to process"
                );
                Ok(ScanAck::NothingToProcess)
            }
            ScanPlan::Ready(scan) => {
                let scan_id = ScanId::generate();
                let total_tasks = scan.total_tasks();
                tracing::info!(
                    %scan_id,
                    channels = scan.channel_count(),
                    total_tasks,
                    "Scan accepted"
                );
                self.spawn_worker(scan_id, scan);
                Ok(ScanAck::Started {
                    scan_id,
                    total_tasks,
                })
            }
        }
    }

    /// Load every channel that can be found; the rest are skipped.
    pub async fn resolve_channels(&self, descriptors: &[ChannelDescriptor]) -> Vec<ChannelSeries> {
        let mut channels = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            let Some(path) = stored_path(&descriptor.path) else {
                tracing::warn!(
                    channel = %descriptor.channel_name,
                    locator = %descriptor.path,
                    "Channel locator has no path parameter, skipping"
                );
                continue;
            };

            match self.store.load_series(&path).await {
                Ok(series) => channels.push(ChannelSeries::new(&descriptor.channel_name, series)),
                Err(e) => {
                    tracing::warn!(
                        channel = %descriptor.channel_name,
                        path = %path,
                        error = %e,
                        "Failed to load channel, skipping"
                    );
                }
            }
        }

        channels
    }

    fn spawn_worker(&self, scan_id: ScanId, scan: PreparedScan) {
        let tx = self.event_tx.clone();
        let sink = BroadcastSink::new(scan_id, tx.clone());

        tokio::spawn(async move {
            match tokio::task::spawn_blocking(move || scan.run(sink)).await {
                Ok(outcome) => {
                    tracing::info!(
                        %scan_id,
                        channels = outcome.channels().len(),
                        matches = outcome.total_matches(),
                        "Scan finished"
                    );
                }
                Err(e) => {
                    let event = fault_event(e);
                    tracing::error!(%scan_id, ?event, "Scan worker failed");
                    // No listener is fine; nobody is waiting for this scan
                    let _ = tx.send(ScanEventEnvelope::new(scan_id, event));
                }
            }
        });
    }
}

/// The `scan_failed` event for a worker that did not finish
fn fault_event(err: JoinError) -> ScanEvent {
    let reason = if err.is_panic() {
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("scan worker panicked: {message}")
    } else {
        "scan worker was cancelled".to_string()
    };

    ScanEvent::Failed { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryChannelStore;
    use std::time::Duration;

    fn params() -> MatchingParams {
        MatchingParams {
            min_window_size: 3,
            ..MatchingParams::default()
        }
    }

    fn request(channels: Vec<ChannelDescriptor>) -> ScanRequest {
        ScanRequest {
            channels,
            reference: ReferenceWaveform::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap(),
            bounds: ScanBounds::unbounded(),
        }
    }

    async fn service_with_channel() -> ScanService {
        let store = InMemoryChannelStore::new();
        store
            .insert_series(
                "Data/ch1.json",
                vec![0.0, 1.0, 2.0, 3.0, 4.0],
                vec![0.0, 1.0, 0.0, 0.0, 1.0],
            )
            .await;
        let (event_tx, _) = broadcast::channel(64);
        ScanService::new(Arc::new(store), event_tx, params())
    }

    async fn collect_until_done(
        rx: &mut broadcast::Receiver<ScanEventEnvelope>,
    ) -> Vec<ScanEventEnvelope> {
        let mut events = Vec::new();
        loop {
            let envelope = tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("scan did not finish in time")
                .unwrap();
            let done = matches!(
                envelope.event,
                ScanEvent::Progress { progress: 100 } | ScanEvent::Failed { .. }
            );
            events.push(envelope);
            if done {
                return events;
            }
        }
    }

    #[tokio::test]
    async fn test_submit_runs_scan_in_background() {
        let service = service_with_channel().await;
        let mut rx = service.subscribe();

        let ack = service
            .submit(request(vec![ChannelDescriptor::new(
                "ch1",
                "/api/channel-data?path=Data/ch1.json",
            )]))
            .await
            .unwrap();
        let ScanAck::Started {
            scan_id,
            total_tasks,
        } = ack
        else {
            panic!("expected scan to start");
        };
        assert_eq!(total_tasks, 3);

        let events = collect_until_done(&mut rx).await;
        assert!(events.iter().all(|e| e.scan_id == scan_id));

        let names: Vec<&str> = events.iter().map(|e| e.event.name()).collect();
        assert_eq!(names, vec!["progress", "matched_results", "progress"]);
        assert_eq!(events[0].event, ScanEvent::progress(33));
        assert_eq!(events[2].event, ScanEvent::progress(100));

        let ScanEvent::MatchedResults { matched_results } = &events[1].event else {
            panic!("expected results");
        };
        assert_eq!(matched_results.len(), 1);
        assert_eq!(matched_results[0].channel_name, "ch1");
        assert_eq!(
            (matched_results[0].start_x, matched_results[0].end_x),
            (0.0, 2.0)
        );
        assert!(matched_results[0].correlation > 0.99);
    }

    #[tokio::test]
    async fn test_unresolvable_channels_are_skipped() {
        let service = service_with_channel().await;

        let ack = service
            .submit(request(vec![
                ChannelDescriptor::new("missing", "/api/channel-data?path=Data/none.json"),
                ChannelDescriptor::new("no-path", "/api/channel-data"),
            ]))
            .await
            .unwrap();

        assert_eq!(ack, ScanAck::NothingToProcess);
    }

    #[tokio::test]
    async fn test_invalid_reference_rejected_before_loading() {
        let service = service_with_channel().await;
        let mut bad = request(Vec::new());
        bad.reference = serde_json::from_str(r#"{"X": [0, 1, 2], "Y": [0, 1]}"#).unwrap();

        assert!(service.submit(bad).await.is_err());
    }

    #[tokio::test]
    async fn test_fault_event_carries_panic_message() {
        let err = tokio::spawn(async { panic!("boom") }).await.unwrap_err();

        match fault_event(err) {
            ScanEvent::Failed { reason } => assert!(reason.contains("boom"), "{reason}"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let request: ScanRequest = serde_json::from_str(
            r#"{
                "selectedChannels": [{"channel_name": "ch1", "path": "/api/channel-data?path=a.json"}],
                "actualPoints": {"X": [0, 1, 2], "Y": [0, 1, 0]},
                "time_begin": 0, "time_end": 10, "upper_bound": 5, "lower_bound": -5
            }"#,
        )
        .unwrap();

        assert_eq!(request.channels.len(), 1);
        assert_eq!(request.reference.len(), 3);
        assert_eq!(request.bounds.time_end, 10.0);
        assert_eq!(request.bounds.lower_bound, -5.0);
    }
}
