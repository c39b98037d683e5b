//! Lock-free progress accounting shared by render workers.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts completed pixels for one render and decides which worker reports.
///
/// A report fires when the count has advanced at least `interval` past the
/// last reported value. The last-reported value only moves through
/// `compare_exchange`, so each crossing is claimed by exactly one worker.
#[derive(Debug)]
pub struct ProgressCounter {
    total: usize,
    interval: usize,
    completed: AtomicUsize,
    reported: AtomicUsize,
}

impl ProgressCounter {
    pub fn new(total: usize, interval: usize) -> Self {
        Self {
            total,
            interval: interval.max(1),
            completed: AtomicUsize::new(0),
            reported: AtomicUsize::new(0),
        }
    }

    /// Record `n` more completed pixels.
    ///
    /// Returns the completed count when this call claims a report.
    pub fn advance(&self, n: usize) -> Option<usize> {
        let completed = self.completed.fetch_add(n, Ordering::AcqRel) + n;
        let mut last = self.reported.load(Ordering::Acquire);

        while completed.saturating_sub(last) >= self.interval {
            match self.reported.compare_exchange_weak(
                last,
                completed,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(completed),
                Err(actual) => last = actual,
            }
        }
        None
    }

    /// Claim the final report at `total`.
    ///
    /// Returns false when a worker already reported `total`, so the last
    /// notification is delivered exactly once.
    pub fn finish(&self) -> bool {
        let mut last = self.reported.load(Ordering::Acquire);
        while last < self.total {
            match self.reported.compare_exchange_weak(
                last,
                self.total,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => last = actual,
            }
        }
        false
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn interval(&self) -> usize {
        self.interval
    }
}
