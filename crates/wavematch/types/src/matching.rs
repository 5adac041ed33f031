//! Match candidates and merged intervals

use serde::{Deserialize, Serialize};

/// A window whose correlation with the reference passed the threshold.
///
/// After merging, the same type represents a merged interval: `start_x` and
/// `end_x` may then subsume several input candidates and `correlation`
/// is the best among them. Bounds are source-series x coordinates, not
/// indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub channel_name: String,
    #[serde(rename = "start_X")]
    pub start_x: f64,
    #[serde(rename = "end_X")]
    pub end_x: f64,
    pub correlation: f64,
}

impl MatchCandidate {
    pub fn new(channel_name: impl Into<String>, start_x: f64, end_x: f64, correlation: f64) -> Self {
        Self {
            channel_name: channel_name.into(),
            start_x,
            end_x,
            correlation,
        }
    }

    /// Whether `other` starts at or before this interval's end.
    ///
    /// Only meaningful when `other.start_x >= self.start_x`.
    pub fn reaches(&self, other: &MatchCandidate) -> bool {
        other.start_x <= self.end_x
    }

    /// Extend this interval over `other`, keeping the best correlation
    pub fn absorb(&mut self, other: &MatchCandidate) {
        self.end_x = self.end_x.max(other.end_x);
        self.correlation = self.correlation.max(other.correlation);
    }
}
