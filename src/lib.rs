//! Convoy: parallel media conversion dispatcher.
//!
//! Scans one directory level for convertible media and fans the files out to
//! a fixed pool of worker threads through a bounded job queue. Each worker
//! hands its file to an external conversion program and reports the outcome
//! into shared counters; the coordinator waits for completion and reports.

pub mod cli;
pub mod convert;
pub mod pool;
pub mod progress;
pub mod queue;
pub mod run;
pub mod scan;
pub mod stats;
pub mod types;
pub mod utils;

pub use convert::{ConvertError, Converter, ScriptConverter};
pub use queue::JobQueue;
pub use run::{convert_dir, handle_run};
pub use stats::{RunStats, StatsSnapshot};
pub use types::{Job, Opts};

/// Result alias used by the public convoy API.
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;
