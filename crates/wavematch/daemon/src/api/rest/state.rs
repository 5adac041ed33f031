//! Application state for API handlers

use crate::scan::ScanService;
use crate::storage::ChannelStore;
use std::sync::Arc;
use tokio::sync::broadcast;
use wavematch_types::ScanEventEnvelope;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Channel storage backend
    pub store: Arc<dyn ChannelStore>,

    /// Scan submission
    pub scans: Arc<ScanService>,

    /// Scan event broadcast channel
    pub event_tx: broadcast::Sender<ScanEventEnvelope>,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn ChannelStore>,
        scans: Arc<ScanService>,
        event_tx: broadcast::Sender<ScanEventEnvelope>,
    ) -> Self {
        Self {
            store,
            scans,
            event_tx,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        format_uptime(duration.num_seconds())
    }
}

fn format_uptime(secs: i64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}
