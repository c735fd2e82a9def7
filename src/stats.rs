//! Shared run counters and completion signalling.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Counters {
    total: Option<usize>,
    completed: usize,
    failed: usize,
}

/// Counters shared by the workers and the coordinator.
///
/// All mutation and snapshot reads happen under one lock so the coordinator
/// never observes torn counts. Completion is event-driven: the worker that
/// pushes `completed` up to the published total signals a capacity-1 channel
/// the coordinator waits on, instead of the coordinator re-polling counters.
pub struct RunStats {
    counters: Mutex<Counters>,
    started: Instant,
    done_tx: Sender<()>,
    done_rx: Receiver<()>,
}

/// Consistent view of the counters at one instant.
#[derive(Clone, Copy, Debug)]
pub struct StatsSnapshot {
    /// Jobs enqueued by the scan; 0 until the total is published.
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl StatsSnapshot {
    pub fn successful(&self) -> usize {
        self.completed - self.failed
    }

    /// Completed jobs per second over the run so far.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { self.completed as f64 / secs } else { 0.0 }
    }

    /// Successful jobs as a percentage of the total.
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.successful() as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl RunStats {
    pub fn new() -> Self {
        let (done_tx, done_rx) = bounded(1);
        Self {
            counters: Mutex::new(Counters::default()),
            started: Instant::now(),
            done_tx,
            done_rx,
        }
    }

    /// Record one finished job. Signals completion when the published total
    /// is reached.
    pub fn record(&self, success: bool) {
        let mut c = self.counters.lock().unwrap();
        c.completed += 1;
        if !success {
            c.failed += 1;
        }
        if c.total.is_some_and(|t| c.completed >= t) {
            let _ = self.done_tx.try_send(());
        }
    }

    /// Publish the final job count. Called exactly once, after the scan
    /// completes. Signals immediately when the workers already caught up
    /// (or when `total` is 0).
    pub fn set_total(&self, total: usize) {
        let mut c = self.counters.lock().unwrap();
        debug_assert!(c.total.is_none(), "total published twice");
        c.total = Some(total);
        if c.completed >= total {
            let _ = self.done_tx.try_send(());
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let c = self.counters.lock().unwrap();
        StatsSnapshot {
            total: c.total.unwrap_or(0),
            completed: c.completed,
            failed: c.failed,
            elapsed: self.started.elapsed(),
        }
    }

    /// Block up to `timeout` for the completion signal. Returns true once
    /// every known job has completed.
    pub fn wait_done(&self, timeout: Duration) -> bool {
        self.done_rx.recv_timeout(timeout).is_ok()
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
