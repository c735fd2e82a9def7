//! Worker pool: a fixed set of threads draining the job queue.

use anyhow::{Context, Result};
use log::{debug, error, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::convert::Converter;
use crate::queue::JobQueue;
use crate::stats::RunStats;
use crate::utils::config::WorkerLimits;

/// Worker count for this run: an explicit override wins (floor 1), otherwise
/// the host's available parallelism capped at
/// [`WorkerLimits::MAX_WORKERS`]. Falls back to
/// [`WorkerLimits::FALLBACK_WORKERS`] when parallelism cannot be determined.
pub fn worker_count(requested: Option<usize>) -> usize {
    if let Some(n) = requested {
        return n.max(1);
    }
    let available = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(WorkerLimits::FALLBACK_WORKERS);
    available.clamp(1, WorkerLimits::MAX_WORKERS)
}

/// Owns the worker threads for one run. Sized once at startup, never
/// resized; workers exit when the queue reports end of work.
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `size` workers. They enter their loop immediately and block on
    /// the empty queue until jobs arrive or shutdown is requested. A thread
    /// that cannot be spawned is fatal for the run.
    pub fn spawn(
        size: usize,
        queue: Arc<JobQueue>,
        stats: Arc<RunStats>,
        converter: Arc<dyn Converter>,
    ) -> Result<Self> {
        let handles = (1..=size)
            .map(|worker_id| {
                let queue = Arc::clone(&queue);
                let stats = Arc::clone(&stats);
                let converter = Arc::clone(&converter);
                thread::Builder::new()
                    .name(format!("worker-{worker_id}"))
                    .spawn(move || worker_loop(worker_id, &queue, &stats, converter.as_ref()))
                    .with_context(|| format!("spawn worker thread {worker_id}"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { handles })
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Wait for every worker to finish its current job and exit its loop.
    pub fn join(self) -> Result<()> {
        for handle in self.handles {
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
        }
        Ok(())
    }
}

/// Dequeue → convert → record, until the queue reports end of work. The
/// converter call runs with no lock held, so one slow conversion never
/// blocks queue operations or other workers.
fn worker_loop(id: usize, queue: &JobQueue, stats: &RunStats, converter: &dyn Converter) {
    debug!("worker {id} started");
    while let Some(job) = queue.dequeue() {
        debug!("worker {id}: processing job {}: {}", job.id, job.path.display());
        match converter.convert(&job.path) {
            Ok(()) => {
                stats.record(true);
                info!("worker {id}: completed job {}: {}", job.id, job.path.display());
            }
            Err(err) => {
                stats.record(false);
                error!(
                    "worker {id}: job {} failed: {err} ({})",
                    job.id,
                    job.path.display()
                );
            }
        }
    }
    debug!("worker {id} exiting");
}
