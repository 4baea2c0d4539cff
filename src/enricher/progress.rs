use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::info;

/// How a pass left one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Nothing to do, no provider call made
    Skipped,
    Resolved,
    Unresolved,
}

/// Thread-safe pass counters. Observability only.
#[derive(Debug)]
pub struct ProgressTracker {
    label: &'static str,
    total: u64,
    log_every: u64,
    processed: AtomicU64,
    resolved: AtomicU64,
    unresolved: AtomicU64,
    skipped: AtomicU64,
    started: Instant,
}

impl ProgressTracker {
    pub fn new(label: &'static str, total: usize, log_every: u64) -> Self {
        Self {
            label,
            total: total as u64,
            log_every,
            processed: AtomicU64::new(0),
            resolved: AtomicU64::new(0),
            unresolved: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    /// Count one finished record
    pub fn record(&self, outcome: RecordOutcome) {
        let counter = match outcome {
            RecordOutcome::Skipped => &self.skipped,
            RecordOutcome::Resolved => &self.resolved,
            RecordOutcome::Unresolved => &self.unresolved,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.log_every > 0 && (processed % self.log_every == 0 || processed == self.total) {
            let snap = self.snapshot();
            info!(
                pass = self.label,
                processed = snap.processed,
                total = snap.total,
                resolved = snap.resolved,
                unresolved = snap.unresolved,
                rate = snap.rate,
                eta_secs = snap.eta.map(|d| d.as_secs()),
                "Progress"
            );
        }
    }

    /// Point-in-time view of the counters
    pub fn snapshot(&self) -> ProgressSnapshot {
        let processed = self.processed.load(Ordering::Relaxed);
        let elapsed = self.started.elapsed();
        let rate = if elapsed.as_secs_f64() > 0.0 {
            processed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let remaining = self.total.saturating_sub(processed);
        let eta = (rate > 0.0).then(|| Duration::from_secs_f64(remaining as f64 / rate));

        ProgressSnapshot {
            pass: self.label,
            total: self.total,
            processed,
            resolved: self.resolved.load(Ordering::Relaxed),
            unresolved: self.unresolved.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            elapsed,
            rate,
            eta,
        }
    }
}

/// Counter values at one instant
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub pass: &'static str,
    pub total: u64,
    pub processed: u64,
    pub resolved: u64,
    pub unresolved: u64,
    pub skipped: u64,
    pub elapsed: Duration,
    /// Records per second
    pub rate: f64,
    pub eta: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_are_monotonic_and_consistent() {
        let tracker = Arc::new(ProgressTracker::new("test", 400, 0));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for n in 0..100 {
                        let outcome = match (i + n) % 3 {
                            0 => RecordOutcome::Resolved,
                            1 => RecordOutcome::Unresolved,
                            _ => RecordOutcome::Skipped,
                        };
                        tracker.record(outcome);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = tracker.snapshot();
        assert_eq!(snap.processed, 400);
        assert_eq!(snap.resolved + snap.unresolved + snap.skipped, 400);
        assert_eq!(snap.eta.unwrap_or_default(), Duration::ZERO);
    }

    #[test]
    fn test_empty_tracker() {
        let snap = ProgressTracker::new("empty", 0, 10).snapshot();
        assert_eq!(snap.processed, 0);
        assert_eq!(snap.total, 0);
    }
}
