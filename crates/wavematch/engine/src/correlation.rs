//! Sliding-window Pearson correlation against a resampled reference

use crate::normalize::population_std;
use crate::resample::resample;
use wavematch_types::{MatchCandidate, Segment};

/// Standard deviations at or below this are treated as zero variance
pub const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Pearson correlation of two equal-length sequences.
///
/// Returns `NaN` when either side has no variance; otherwise the value is
/// clamped to `[-1, 1]` to absorb rounding.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let a = &a[..n];
    let b = &b[..n];
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx * syy).sqrt();
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        f64::NAN
    }
}

/// Matcher for one window size.
///
/// Holds the standardized reference resampled to `window_size` samples and
/// slides it across standardized segments.
#[derive(Debug, Clone)]
pub struct CorrelationMatcher {
    reference: Vec<f64>,
    window_size: usize,
    step_size: usize,
    threshold: f64,
}

impl CorrelationMatcher {
    /// Build a matcher, or `None` when the resampled reference is flat and
    /// no correlation can be computed at this window size.
    pub fn new(
        reference_std: &[f64],
        window_size: usize,
        step_size: usize,
        threshold: f64,
    ) -> Option<Self> {
        let reference = resample(reference_std, window_size);
        if reference.is_empty() || population_std(&reference) <= ZERO_VARIANCE_TOLERANCE {
            return None;
        }
        Some(Self {
            reference,
            window_size,
            step_size: step_size.max(1),
            threshold,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Slide across `segment` and return the windows that pass the threshold.
    ///
    /// `segment_y_std` is the segment's Y standardized on its own and must be
    /// as long as the segment. `on_step` runs once per slide position,
    /// including positions skipped for zero variance or an undefined
    /// correlation. After a match the slide jumps past the whole window, so
    /// candidates at one window size never overlap.
    pub fn find_matches<F>(
        &self,
        channel_name: &str,
        segment: &Segment<'_>,
        segment_y_std: &[f64],
        mut on_step: F,
    ) -> Vec<MatchCandidate>
    where
        F: FnMut(),
    {
        debug_assert_eq!(segment.len(), segment_y_std.len());
        let xs = segment.x();
        let len = segment_y_std.len().min(xs.len());
        let w = self.window_size;
        let mut matches = Vec::new();

        let mut i = 0;
        while i + w <= len {
            let window = &segment_y_std[i..i + w];
            on_step();

            if population_std(window) <= ZERO_VARIANCE_TOLERANCE {
                i += self.step_size;
                continue;
            }

            let corr = pearson(&self.reference, window);
            if corr.is_nan() {
                i += self.step_size;
                continue;
            }

            if corr >= self.threshold {
                matches.push(MatchCandidate::new(channel_name, xs[i], xs[i + w - 1], corr));
                i += w;
            } else {
                i += self.step_size;
            }
        }

        matches
    }
}
