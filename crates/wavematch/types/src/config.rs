//! Scan configuration

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Caller-specified region of interest for a scan.
///
/// A sample is inside the region iff `time_begin <= x <= time_end` and
/// `lower_bound <= y <= upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanBounds {
    pub time_begin: f64,
    pub time_end: f64,
    pub upper_bound: f64,
    pub lower_bound: f64,
}

impl ScanBounds {
    /// Bounds that admit every finite sample
    pub fn unbounded() -> Self {
        Self {
            time_begin: f64::NEG_INFINITY,
            time_end: f64::INFINITY,
            upper_bound: f64::INFINITY,
            lower_bound: f64::NEG_INFINITY,
        }
    }

    /// Whether `(x, y)` lies inside both the time and value bounds
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.time_begin <= x && x <= self.time_end && self.lower_bound <= y && y <= self.upper_bound
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("time_begin", self.time_begin),
            ("time_end", self.time_end),
            ("upper_bound", self.upper_bound),
            ("lower_bound", self.lower_bound),
        ];
        match named.iter().find(|(_, value)| value.is_nan()) {
            Some((name, _)) => Err(ValidationError::NanBound { name: *name }),
            None => Ok(()),
        }
    }
}

/// Tunables shared by every scan a service runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingParams {
    /// Minimum Pearson correlation for a window to count as a match
    pub threshold: f64,

    /// Smallest window size tried
    pub min_window_size: usize,

    /// `step_size = max(1, reference_len / step_divisor)`
    pub step_divisor: usize,
}

impl Default for MatchingParams {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            min_window_size: 10,
            step_divisor: 5,
        }
    }
}

/// Immutable parameters for one scan, derived from the reference length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScanConfig {
    bounds: ScanBounds,
    min_window_size: usize,
    max_window_size: usize,
    step_size: usize,
    threshold: f64,
}

impl ScanConfig {
    /// Derive the scan configuration for a reference of `reference_len` samples.
    ///
    /// `max_window_size` is the reference length and the step size is a fifth
    /// of it (with the default divisor), never less than one.
    pub fn new(
        bounds: ScanBounds,
        params: MatchingParams,
        reference_len: usize,
    ) -> Result<Self, ValidationError> {
        bounds.validate()?;
        if params.min_window_size < 2 {
            return Err(ValidationError::WindowTooSmall(params.min_window_size));
        }
        if params.step_divisor == 0 {
            return Err(ValidationError::ZeroStep);
        }
        if !params.threshold.is_finite() || !(-1.0..=1.0).contains(&params.threshold) {
            return Err(ValidationError::InvalidThreshold(params.threshold));
        }
        if reference_len == 0 {
            return Err(ValidationError::EmptyReference);
        }

        Ok(Self {
            bounds,
            min_window_size: params.min_window_size,
            max_window_size: reference_len,
            step_size: (reference_len / params.step_divisor).max(1),
            threshold: params.threshold,
        })
    }

    pub fn bounds(&self) -> &ScanBounds {
        &self.bounds
    }

    pub fn min_window_size(&self) -> usize {
        self.min_window_size
    }

    pub fn max_window_size(&self) -> usize {
        self.max_window_size
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Window sizes tried against a segment of `segment_len` samples.
    ///
    /// Empty when the segment is shorter than `min_window_size` or the
    /// reference is shorter than `min_window_size`.
    pub fn window_sizes(&self, segment_len: usize) -> RangeInclusive<usize> {
        self.min_window_size..=self.max_window_size.min(segment_len)
    }

    /// Upper bound on slide positions for one window size over one segment
    pub fn slide_positions(&self, segment_len: usize, window_size: usize) -> u64 {
        if window_size > segment_len {
            return 0;
        }
        ((segment_len - window_size) / self.step_size + 1) as u64
    }
}
