//! Fixed-capacity hand-off queue between the scanner and the worker pool.

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, select};
use std::sync::Mutex;

use crate::types::Job;

/// Thread-safe FIFO with a hard capacity bound and a one-way shutdown signal.
///
/// `enqueue` blocks while the queue is full and `dequeue` blocks while it is
/// empty, so the scanner gets backpressure on large directories and idle
/// workers park instead of spinning. Requesting shutdown releases every
/// blocked caller at once: further enqueues are rejected, dequeues drain the
/// remaining backlog in order and then report end of work.
///
/// The shutdown signal is a zero-capacity channel whose sender is dropped on
/// [`request_shutdown`](JobQueue::request_shutdown); a disconnected channel is
/// always ready in `select!`, so no dummy wakeup job is ever needed.
pub struct JobQueue {
    jobs_tx: Sender<Job>,
    jobs_rx: Receiver<Job>,
    shutdown_tx: Mutex<Option<Sender<()>>>,
    shutdown_rx: Receiver<()>,
}

impl JobQueue {
    /// Create a queue holding at most `capacity` jobs.
    pub fn new(capacity: usize) -> Self {
        let (jobs_tx, jobs_rx) = bounded(capacity);
        let (shutdown_tx, shutdown_rx) = bounded(0);
        Self {
            jobs_tx,
            jobs_rx,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            shutdown_rx,
        }
    }

    pub fn capacity(&self) -> usize {
        self.jobs_tx.capacity().unwrap_or(0)
    }

    /// Number of jobs currently queued. Never exceeds [`capacity`](JobQueue::capacity).
    pub fn len(&self) -> usize {
        self.jobs_rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs_rx.is_empty()
    }

    /// True once shutdown has been requested. Never reverts.
    pub fn is_shut_down(&self) -> bool {
        matches!(self.shutdown_rx.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Insert a job at the tail, blocking while the queue is full.
    ///
    /// Returns the job back if shutdown was requested before it could be
    /// inserted, including when the caller was already blocked on a full
    /// queue when shutdown arrived.
    pub fn enqueue(&self, job: Job) -> Result<(), Job> {
        if self.is_shut_down() {
            return Err(job);
        }
        select! {
            send(self.jobs_tx, job) -> res => match res {
                Ok(()) => Ok(()),
                Err(err) => Err(err.into_inner()),
            },
            recv(self.shutdown_rx) -> _ => Err(job),
        }
    }

    /// Remove the job at the head, blocking while the queue is empty.
    ///
    /// `None` means shutdown was requested and the backlog is drained: no
    /// more work will ever arrive and the caller should exit its loop.
    pub fn dequeue(&self) -> Option<Job> {
        select! {
            recv(self.jobs_rx) -> msg => msg.ok(),
            // Shutdown requested: hand out whatever is still queued, in
            // FIFO order, before reporting end of work.
            recv(self.shutdown_rx) -> _ => self.jobs_rx.try_recv().ok(),
        }
    }

    /// Signal shutdown and wake every thread blocked on enqueue or dequeue.
    /// Idempotent; the flag never reverts.
    pub fn request_shutdown(&self) {
        let _ = self.shutdown_tx.lock().unwrap().take();
    }
}
