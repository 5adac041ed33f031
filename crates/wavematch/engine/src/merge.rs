//! Interval merging across window sizes

use wavematch_types::MatchCandidate;

/// Merge overlapping or touching candidates of one channel.
///
/// Sorts by `start_x` and sweeps once: a candidate starting at or before
/// the open interval's end is absorbed (end extended, best correlation
/// kept). The output is sorted and strictly non-overlapping.
pub fn merge_intervals(mut candidates: Vec<MatchCandidate>) -> Vec<MatchCandidate> {
    candidates.sort_by(|a, b| a.start_x.total_cmp(&b.start_x));

    let mut merged: Vec<MatchCandidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match merged.last_mut() {
            Some(open) if open.reaches(&candidate) => open.absorb(&candidate),
            _ => merged.push(candidate),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn candidate(start_x: f64, end_x: f64, correlation: f64) -> MatchCandidate {
        MatchCandidate::new("ch", start_x, end_x, correlation)
    }

    #[test]
    fn test_overlapping_pair() {
        let merged = merge_intervals(vec![candidate(4.0, 9.0, 0.9), candidate(0.0, 5.0, 0.85)]);
        assert_eq!(merged, vec![candidate(0.0, 9.0, 0.9)]);
    }

    #[test]
    fn test_touching_intervals_merge() {
        let merged = merge_intervals(vec![candidate(0.0, 5.0, 0.81), candidate(5.0, 7.0, 0.8)]);
        assert_eq!(merged, vec![candidate(0.0, 7.0, 0.81)]);
    }

    #[test]
    fn test_disjoint_and_nested() {
        let merged = merge_intervals(vec![
            candidate(10.0, 12.0, 0.8),
            candidate(0.0, 8.0, 0.82),
            candidate(2.0, 3.0, 0.97),
        ]);
        assert_eq!(
            merged,
            vec![candidate(0.0, 8.0, 0.97), candidate(10.0, 12.0, 0.8)]
        );
    }

    #[test]
    fn test_empty() {
        assert!(merge_intervals(Vec::new()).is_empty());
    }

    fn arb_candidate() -> impl Strategy<Value = MatchCandidate> {
        (0.0f64..100.0, 0.0f64..20.0, 0.8f64..1.0)
            .prop_map(|(start, len, corr)| candidate(start, start + len, corr))
    }

    proptest! {
        #[test]
        fn prop_merged_sorted_disjoint_and_max(
            input in prop::collection::vec(arb_candidate(), 0..50)
        ) {
            let merged = merge_intervals(input.clone());

            for pair in merged.windows(2) {
                prop_assert!(pair[0].end_x < pair[1].start_x);
            }

            for interval in &merged {
                let absorbed: Vec<&MatchCandidate> = input
                    .iter()
                    .filter(|c| c.start_x >= interval.start_x && c.start_x <= interval.end_x)
                    .collect();
                prop_assert!(!absorbed.is_empty());
                let best = absorbed.iter().map(|c| c.correlation).fold(f64::MIN, f64::max);
                prop_assert_eq!(interval.correlation, best);
                let end = absorbed.iter().map(|c| c.end_x).fold(f64::MIN, f64::max);
                prop_assert_eq!(interval.end_x, end);
            }

            prop_assert!(merged.len() <= input.len());
        }
    }
}
