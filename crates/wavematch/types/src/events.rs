//! Scan events
//!
//! A scan reports to its listeners through a stream of [`ScanEvent`]s:
//! `progress` whenever the integer percentage changes, one
//! `matched_results` once every channel is merged, and a final
//! `progress` of 100. A scan that faults after being accepted emits a
//! single `scan_failed` instead of the results.

use crate::matching::MatchCandidate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one accepted scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(Uuid);

impl ScanId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scan:{}", self.0)
    }
}

/// Events emitted by a running scan.
///
/// Serialized untagged so the payload is exactly what listeners receive,
/// e.g. `{"progress": 42}`; the event name travels separately via
/// [`ScanEvent::name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanEvent {
    /// Integer completion percentage in `[0, 100]`
    Progress { progress: u8 },

    /// Merged intervals of every channel, flattened
    MatchedResults { matched_results: Vec<MatchCandidate> },

    /// The background worker faulted; no results will follow
    Failed { reason: String },
}

impl ScanEvent {
    pub fn progress(progress: u8) -> Self {
        ScanEvent::Progress { progress }
    }

    /// Event name used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ScanEvent::Progress { .. } => "progress",
            ScanEvent::MatchedResults { .. } => "matched_results",
            ScanEvent::Failed { .. } => "scan_failed",
        }
    }
}

/// A scan event tagged with the scan that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanEventEnvelope {
    pub scan_id: ScanId,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub event: ScanEvent,
}

impl ScanEventEnvelope {
    pub fn new(scan_id: ScanId, event: ScanEvent) -> Self {
        Self {
            scan_id,
            timestamp: chrono::Utc::now(),
            event,
        }
    }
}
