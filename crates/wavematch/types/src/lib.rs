//! Wavematch Types - Core types for reference waveform search
//!
//! Wavematch locates occurrences of a user-drawn reference waveform inside a
//! set of longer time-series channels and reports, per channel, the intervals
//! whose shape correlates with the reference above a threshold.
//!
//! ## Key Concepts
//!
//! - **TimeSeries**: ordered `(x, y)` samples of one channel
//! - **Segment**: a maximal contiguous run of samples inside the scan bounds
//! - **MatchCandidate**: one window whose correlation passed the threshold
//! - **ScanConfig**: immutable parameters for one scan
//! - **ScanEvent**: progress and result notifications emitted by a scan

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod matching;
pub mod series;

pub use channel::{ChannelDescriptor, ChannelSeries};
pub use config::{MatchingParams, ScanBounds, ScanConfig};
pub use error::ValidationError;
pub use events::{ScanEvent, ScanEventEnvelope, ScanId};
pub use matching::MatchCandidate;
pub use series::{ReferenceWaveform, Segment, TimeSeries};
