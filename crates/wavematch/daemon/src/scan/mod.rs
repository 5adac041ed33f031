//! Scan execution for wavematch-daemon

mod service;
mod sink;

pub use service::{ScanAck, ScanRequest, ScanService};
pub use sink::BroadcastSink;
