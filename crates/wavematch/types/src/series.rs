//! Time series and segment types

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Ordered `(x, y)` samples of a single channel, stored column-wise.
///
/// `x` is non-decreasing by construction of the source data; it is never
/// re-sorted here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from equal-length columns
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ValidationError> {
        if x.len() != y.len() {
            return Err(ValidationError::SeriesLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Create a series, truncating the longer column to the shorter one.
    ///
    /// Returns the series and the number of samples dropped.
    pub fn from_columns_truncating(mut x: Vec<f64>, mut y: Vec<f64>) -> (Self, usize) {
        let len = x.len().min(y.len());
        let dropped = x.len().max(y.len()) - len;
        x.truncate(len);
        y.truncate(len);
        (Self { x, y }, dropped)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate samples as `(x, y)` pairs
    pub fn samples(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Borrow the samples in `start..end` as a segment
    pub fn segment(&self, start: usize, end: usize) -> Segment<'_> {
        Segment {
            offset: start,
            x: &self.x[start..end],
            y: &self.y[start..end],
        }
    }
}

/// A maximal contiguous run of samples from a [`TimeSeries`] that all lie
/// inside the scan bounds. Borrows from the series it was cut from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    offset: usize,
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> Segment<'a> {
    /// Index of the first sample within the source series
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    pub fn y(&self) -> &'a [f64] {
        self.y
    }
}

/// The user-drawn waveform being searched for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceWaveform {
    #[serde(rename = "X")]
    x: Vec<f64>,
    #[serde(rename = "Y")]
    y: Vec<f64>,
}

impl ReferenceWaveform {
    /// Create a reference, rejecting empty or mismatched columns
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ValidationError> {
        let reference = Self { x, y };
        reference.validate()?;
        Ok(reference)
    }

    /// Check the invariants that deserialization cannot enforce
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.x.len() != self.y.len() {
            return Err(ValidationError::ReferenceLengthMismatch {
                x_len: self.x.len(),
                y_len: self.y.len(),
            });
        }
        if self.y.is_empty() {
            return Err(ValidationError::EmptyReference);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_rejects_mismatch() {
        let err = TimeSeries::new(vec![0.0, 1.0], vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::SeriesLengthMismatch { x_len: 2, y_len: 1 }
        );
    }

    #[test]
    fn test_truncating_constructor() {
        let (series, dropped) =
            TimeSeries::from_columns_truncating(vec![0.0, 1.0, 2.0], vec![5.0, 6.0]);
        assert_eq!(series.len(), 2);
        assert_eq!(dropped, 1);
        assert_eq!(series.samples().collect::<Vec<_>>(), vec![(0.0, 5.0), (1.0, 6.0)]);
    }

    #[test]
    fn test_segment_borrows_range() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0, 7.0]).unwrap();
        let segment = series.segment(1, 3);
        assert_eq!(segment.offset(), 1);
        assert_eq!(segment.x(), &[1.0, 2.0]);
        assert_eq!(segment.y(), &[5.0, 6.0]);
    }

    #[test]
    fn test_reference_validation() {
        assert_eq!(
            ReferenceWaveform::new(vec![], vec![]).unwrap_err(),
            ValidationError::EmptyReference
        );
        assert!(ReferenceWaveform::new(vec![0.0], vec![1.0, 2.0]).is_err());
        assert_eq!(ReferenceWaveform::new(vec![0.0, 1.0], vec![1.0, 2.0]).unwrap().len(), 2);
    }

    #[test]
    fn test_reference_deserializes_upper_case_columns() {
        let reference: ReferenceWaveform =
            serde_json::from_str(r#"{"X": [0, 1, 2], "Y": [0, 1, 0]}"#).unwrap();
        assert_eq!(reference.y(), &[0.0, 1.0, 0.0]);
    }
}
