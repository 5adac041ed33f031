//! Scan orchestration across channels and window sizes
//!
//! A scan runs in two phases. [`plan_scan`] standardizes the reference and
//! counts every slide position the scan could visit; a plan with nothing to
//! do is reported as [`ScanPlan::NothingToProcess`] so the caller never
//! starts a worker for it. [`PreparedScan::run`] then does the matching,
//! pushing progress and the final results into an [`EventSink`].

use crate::correlation::CorrelationMatcher;
use crate::error::EngineResult;
use crate::filter::filter_range;
use crate::merge::merge_intervals;
use crate::normalize::standardize;
use crate::progress::{EventSink, ProgressTracker};
use wavematch_types::{
    ChannelSeries, MatchCandidate, MatchingParams, ReferenceWaveform, ScanBounds, ScanConfig,
    ScanEvent, TimeSeries,
};

/// Slide positions one segment contributes across all window sizes
fn segment_tasks(segment_len: usize, config: &ScanConfig) -> u64 {
    config
        .window_sizes(segment_len)
        .map(|window_size| config.slide_positions(segment_len, window_size))
        .sum()
}

fn series_tasks(series: &TimeSeries, config: &ScanConfig) -> u64 {
    filter_range(series, config.bounds())
        .iter()
        .map(|segment| segment_tasks(segment.len(), config))
        .sum()
}

/// Upper bound on slide steps for a whole scan.
///
/// Ignores the jumps taken after a match, so the real step count is at
/// most this.
pub fn count_tasks(channels: &[ChannelSeries], config: &ScanConfig) -> u64 {
    channels
        .iter()
        .map(|channel| series_tasks(&channel.series, config))
        .sum()
}

/// Result of planning a scan
#[derive(Debug)]
pub enum ScanPlan {
    /// No segment of any channel can hold a window
    NothingToProcess,
    /// Work to do; hand this to a worker
    Ready(PreparedScan),
}

/// Validate inputs, derive the scan configuration, and count the work.
pub fn plan_scan(
    reference: &ReferenceWaveform,
    channels: Vec<ChannelSeries>,
    bounds: ScanBounds,
    params: MatchingParams,
) -> EngineResult<ScanPlan> {
    reference.validate()?;
    let config = ScanConfig::new(bounds, params, reference.len())?;
    let total_tasks = count_tasks(&channels, &config);

    tracing::debug!(
        channels = channels.len(),
        total_tasks,
        max_window_size = config.max_window_size(),
        step_size = config.step_size(),
        "Scan planned"
    );

    if total_tasks == 0 {
        return Ok(ScanPlan::NothingToProcess);
    }

    Ok(ScanPlan::Ready(PreparedScan {
        reference_std: standardize(reference.y()),
        channels,
        config,
        total_tasks,
    }))
}

/// A scan with its inputs loaded and its work counted
#[derive(Debug, Clone)]
pub struct PreparedScan {
    reference_std: Vec<f64>,
    channels: Vec<ChannelSeries>,
    config: ScanConfig,
    total_tasks: u64,
}

impl PreparedScan {
    pub fn total_tasks(&self) -> u64 {
        self.total_tasks
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Run the scan to completion.
    ///
    /// Emits `progress` whenever the integer percentage changes, then one
    /// `matched_results` with every channel's merged intervals, then a final
    /// `progress` of 100.
    pub fn run<S: EventSink>(&self, mut sink: S) -> ScanOutcome {
        let mut tracker = ProgressTracker::new(self.total_tasks);
        let mut outcome = ScanOutcome::default();

        for channel in &self.channels {
            let segments = filter_range(&channel.series, self.config.bounds());
            if segments.is_empty() {
                tracing::debug!(channel = %channel.name, "No samples within bounds, skipping");
                continue;
            }

            let mut candidates: Vec<MatchCandidate> = Vec::new();
            for segment in &segments {
                if segment.len() < self.config.min_window_size() {
                    continue;
                }
                // Each segment gets its own mean and deviation
                let y_std = standardize(segment.y());

                for window_size in self.config.window_sizes(segment.len()) {
                    let matcher = CorrelationMatcher::new(
                        &self.reference_std,
                        window_size,
                        self.config.step_size(),
                        self.config.threshold(),
                    );

                    match matcher {
                        Some(matcher) => {
                            let found =
                                matcher.find_matches(&channel.name, segment, &y_std, || {
                                    if let Some(pct) = tracker.advance(1) {
                                        sink.emit(ScanEvent::progress(pct));
                                    }
                                });
                            candidates.extend(found);
                        }
                        None => {
                            // Flat reference at this size: credit every position
                            let skipped = self.config.slide_positions(segment.len(), window_size);
                            if let Some(pct) = tracker.advance(skipped) {
                                sink.emit(ScanEvent::progress(pct));
                            }
                        }
                    }
                }
            }

            let merged = merge_intervals(candidates);
            tracing::debug!(
                channel = %channel.name,
                segments = segments.len(),
                matches = merged.len(),
                "Channel scanned"
            );
            outcome.insert(channel.name.clone(), merged);
        }

        tracing::info!(
            channels = outcome.channels.len(),
            matches = outcome.total_matches(),
            processed = tracker.processed_tasks(),
            total = tracker.total_tasks(),
            "Scan complete"
        );

        sink.emit(ScanEvent::MatchedResults {
            matched_results: outcome.flatten(),
        });
        sink.emit(ScanEvent::progress(tracker.finish()));

        outcome
    }
}

/// Merged intervals of one channel
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMatches {
    pub channel_name: String,
    pub intervals: Vec<MatchCandidate>,
}

/// Per-channel results of a finished scan, in channel order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    channels: Vec<ChannelMatches>,
}

impl ScanOutcome {
    /// Store a channel's intervals; a repeated name replaces the earlier
    /// entry in place.
    fn insert(&mut self, channel_name: String, intervals: Vec<MatchCandidate>) {
        match self
            .channels
            .iter_mut()
            .find(|entry| entry.channel_name == channel_name)
        {
            Some(entry) => entry.intervals = intervals,
            None => self.channels.push(ChannelMatches {
                channel_name,
                intervals,
            }),
        }
    }

    pub fn channels(&self) -> &[ChannelMatches] {
        &self.channels
    }

    pub fn get(&self, channel_name: &str) -> Option<&[MatchCandidate]> {
        self.channels
            .iter()
            .find(|entry| entry.channel_name == channel_name)
            .map(|entry| entry.intervals.as_slice())
    }

    pub fn total_matches(&self) -> usize {
        self.channels.iter().map(|entry| entry.intervals.len()).sum()
    }

    /// All intervals, channel by channel
    pub fn flatten(&self) -> Vec<MatchCandidate> {
        self.channels
            .iter()
            .flat_map(|entry| entry.intervals.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(min_window_size: usize) -> MatchingParams {
        MatchingParams {
            min_window_size,
            ..MatchingParams::default()
        }
    }

    fn channel(name: &str, ys: &[f64]) -> ChannelSeries {
        let xs = (0..ys.len()).map(|i| i as f64).collect();
        ChannelSeries::new(name, TimeSeries::new(xs, ys.to_vec()).unwrap())
    }

    #[test]
    fn test_count_tasks_matches_formula() {
        let config = ScanConfig::new(ScanBounds::unbounded(), params(3), 5).unwrap();
        // step = 1, segment length 8, windows 3..=5: 6 + 5 + 4
        let channels = vec![channel("a", &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])];
        assert_eq!(count_tasks(&channels, &config), 15);
    }

    #[test]
    fn test_count_tasks_per_segment() {
        let bounds = ScanBounds {
            lower_bound: 0.0,
            upper_bound: 10.0,
            ..ScanBounds::unbounded()
        };
        let config = ScanConfig::new(bounds, params(3), 3).unwrap();
        // segments of length 4 and 3 split by the out-of-range sample
        let channels = vec![channel("a", &[1.0, 2.0, 3.0, 4.0, 99.0, 1.0, 2.0, 3.0])];
        assert_eq!(count_tasks(&channels, &config), 2 + 1);
    }

    #[test]
    fn test_nothing_to_process_when_bounds_exclude_all() {
        let reference = ReferenceWaveform::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
        let bounds = ScanBounds {
            time_begin: 100.0,
            time_end: 200.0,
            ..ScanBounds::unbounded()
        };
        let plan = plan_scan(&reference, vec![channel("a", &[0.0, 1.0, 0.0, 0.0, 1.0])], bounds, params(3))
            .unwrap();
        assert!(matches!(plan, ScanPlan::NothingToProcess));
    }

    #[test]
    fn test_repeated_channel_name_replaces_in_place() {
        let mut outcome = ScanOutcome::default();
        outcome.insert("a".into(), vec![MatchCandidate::new("a", 0.0, 1.0, 0.9)]);
        outcome.insert("b".into(), Vec::new());
        outcome.insert("a".into(), Vec::new());

        assert_eq!(outcome.channels().len(), 2);
        assert_eq!(outcome.channels()[0].channel_name, "a");
        assert_eq!(outcome.get("a"), Some(&[][..]));
        assert_eq!(outcome.total_matches(), 0);
    }

    #[test]
    fn test_flat_reference_still_completes_progress() {
        let reference = ReferenceWaveform::new(vec![0.0, 1.0, 2.0], vec![2.0, 2.0, 2.0]).unwrap();
        let plan = plan_scan(
            &reference,
            vec![channel("a", &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0])],
            ScanBounds::unbounded(),
            params(3),
        )
        .unwrap();
        let ScanPlan::Ready(scan) = plan else {
            panic!("expected work");
        };

        let mut events = Vec::new();
        let outcome = scan.run(&mut events);

        assert_eq!(outcome.total_matches(), 0);
        assert_eq!(events.last(), Some(&ScanEvent::progress(100)));
        assert!(events.contains(&ScanEvent::progress(99)));
    }
}
