//! Range filtering of raw series into segments

use wavematch_types::{ScanBounds, Segment, TimeSeries};

/// Cut `series` into maximal contiguous runs of in-bounds samples.
///
/// Single left-to-right pass: the first out-of-bounds sample closes the
/// current run. Segments come back in x-order, never overlap, and borrow
/// from `series`. No match anywhere yields an empty vector.
pub fn filter_range<'a>(series: &'a TimeSeries, bounds: &ScanBounds) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut start: Option<usize> = None;

    for (i, (x, y)) in series.samples().enumerate() {
        match (bounds.contains(x, y), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                segments.push(series.segment(s, i));
                start = None;
            }
            _ => {}
        }
    }

    if let Some(s) = start {
        segments.push(series.segment(s, series.len()));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds(time_begin: f64, time_end: f64, lower_bound: f64, upper_bound: f64) -> ScanBounds {
        ScanBounds {
            time_begin,
            time_end,
            upper_bound,
            lower_bound,
        }
    }

    #[test]
    fn test_splits_on_value_violation() {
        let series = TimeSeries::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.0, 2.0, 9.0, 2.0, 3.0, 1.0],
        )
        .unwrap();
        let segments = filter_range(&series, &bounds(0.0, 10.0, 0.0, 5.0));

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].x(), &[0.0, 1.0]);
        assert_eq!(segments[1].x(), &[3.0, 4.0, 5.0]);
        assert_eq!(segments[1].offset(), 3);
    }

    #[test]
    fn test_time_bounds_trim_edges() {
        let series = TimeSeries::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0; 4]).unwrap();
        let segments = filter_range(&series, &bounds(1.0, 2.0, -1.0, 1.0));

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].x(), &[1.0, 2.0]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let series = TimeSeries::new(vec![0.0, 1.0], vec![10.0, 11.0]).unwrap();
        assert!(filter_range(&series, &bounds(0.0, 1.0, 0.0, 1.0)).is_empty());
        assert!(filter_range(&TimeSeries::default(), &ScanBounds::unbounded()).is_empty());
    }

    #[test]
    fn test_consecutive_violations_do_not_emit_empty_segments() {
        let series =
            TimeSeries::new(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![0.0, 9.0, 9.0, 9.0, 0.0]).unwrap();
        let segments = filter_range(&series, &bounds(0.0, 4.0, -1.0, 1.0));

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.len() == 1));
    }

    proptest! {
        #[test]
        fn prop_segments_respect_bounds_and_order(
            ys in prop::collection::vec(-10.0f64..10.0, 0..200),
            lower in -10.0f64..0.0,
            upper in 0.0f64..10.0,
            time_begin in 0.0f64..50.0,
            span in 0.0f64..200.0,
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
            let series = TimeSeries::new(xs, ys).unwrap();
            let b = bounds(time_begin, time_begin + span, lower, upper);
            let segments = filter_range(&series, &b);

            let mut last_index: Option<usize> = None;
            for segment in &segments {
                prop_assert!(!segment.is_empty());
                for (k, (&x, &y)) in segment.x().iter().zip(segment.y()).enumerate() {
                    prop_assert!(b.contains(x, y));
                    let index = segment.offset() + k;
                    prop_assert_eq!(series.x()[index], x);
                    if let Some(last) = last_index {
                        prop_assert!(index > last);
                    }
                    last_index = Some(index);
                }
            }
        }
    }
}
