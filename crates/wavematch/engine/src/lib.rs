//! Wavematch Engine - multi-scale correlation matching
//!
//! Finds the regions of each channel whose shape correlates with a reference
//! waveform. The pipeline for one scan:
//!
//! 1. The reference is standardized once ([`normalize`]).
//! 2. Each channel is cut into in-bounds segments ([`filter`]).
//! 3. Each segment is standardized on its own, then every window size from
//!    the configured minimum up to the reference length is slid across it,
//!    comparing against the reference resampled to that size
//!    ([`resample`], [`correlation`]).
//! 4. Candidates of one channel are merged into non-overlapping intervals
//!    ([`merge`]).
//!
//! The engine is synchronous and does no I/O. Progress and results are
//! pushed through an [`EventSink`] supplied by the caller.

#![deny(unsafe_code)]

pub mod correlation;
pub mod error;
pub mod filter;
pub mod merge;
pub mod normalize;
pub mod progress;
pub mod resample;
pub mod scan;

pub use correlation::{pearson, CorrelationMatcher};
pub use error::{EngineError, EngineResult};
pub use filter::filter_range;
pub use merge::merge_intervals;
pub use normalize::{standardize, STD_EPSILON};
pub use progress::{EventSink, ProgressTracker};
pub use resample::resample;
pub use scan::{count_tasks, plan_scan, PreparedScan, ScanOutcome, ScanPlan};
