//! Public types for the convoy API and run options.

use std::path::PathBuf;

/// One file queued for conversion. Owned by the queue while enqueued;
/// ownership moves to the worker that dequeues it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// Path handed to the conversion program, one invocation per job.
    pub path: PathBuf,
    /// Scan-order id, strictly increasing from 1.
    pub id: u64,
}

/// Options for [`convert_dir`](crate::convert_dir).
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Override worker thread count. When None, derived from available CPUs
    /// and capped (see [`worker_count`](crate::pool::worker_count)).
    pub workers: Option<usize>,
    /// Job queue capacity. When None, uses
    /// [`DEFAULT_QUEUE_CAPACITY`](crate::utils::config::DEFAULT_QUEUE_CAPACITY).
    pub queue_capacity: Option<usize>,
    /// Draw a progress bar and print the final summary to stdout (CLI mode).
    pub report: bool,
    /// Verbose output.
    pub verbose: bool,
}
