//! Progress accounting and event delivery

use wavematch_types::ScanEvent;

/// Receiver for the events a scan produces.
///
/// The engine never owns a transport; callers inject a sink and decide
/// where events go.
pub trait EventSink {
    fn emit(&mut self, event: ScanEvent);
}

impl EventSink for Vec<ScanEvent> {
    fn emit(&mut self, event: ScanEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: ScanEvent) {
        (**self).emit(event);
    }
}

/// Counts completed slide steps against the pre-pass total.
///
/// [`advance`](Self::advance) reports a percentage only when its integer
/// value changes, and never reports 100: the terminal 100 belongs to
/// [`finish`](Self::finish), after results are out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    processed_tasks: u64,
    total_tasks: u64,
    last_emitted_percent: u8,
}

impl ProgressTracker {
    pub fn new(total_tasks: u64) -> Self {
        Self {
            processed_tasks: 0,
            total_tasks,
            last_emitted_percent: 0,
        }
    }

    pub fn processed_tasks(&self) -> u64 {
        self.processed_tasks
    }

    pub fn total_tasks(&self) -> u64 {
        self.total_tasks
    }

    pub fn last_emitted_percent(&self) -> u8 {
        self.last_emitted_percent
    }

    /// Current floor percentage, capped at 100
    pub fn percent(&self) -> u8 {
        if self.total_tasks == 0 {
            return 100;
        }
        let pct = self.processed_tasks.saturating_mul(100) / self.total_tasks;
        pct.min(100) as u8
    }

    /// Record `steps` processed steps; returns the percentage to emit, if any
    pub fn advance(&mut self, steps: u64) -> Option<u8> {
        self.processed_tasks = self.processed_tasks.saturating_add(steps);
        let pct = self.percent().min(99);
        if pct != self.last_emitted_percent {
            self.last_emitted_percent = pct;
            Some(pct)
        } else {
            None
        }
    }

    /// Mark the scan complete; always returns 100
    pub fn finish(&mut self) -> u8 {
        self.last_emitted_percent = 100;
        100
    }
}
