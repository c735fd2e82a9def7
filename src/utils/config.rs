//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::time::Duration;

/// Conversion program location, resolved relative to the process working
/// directory when `--script` is not given.
pub const DEFAULT_SCRIPT: &str = "lib/convert.sh";

/// Job queue capacity. Bounds scanner memory and applies backpressure when
/// the directory holds more files than the workers can keep up with.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Drain loop tick. The coordinator wakes on the completion signal; this
/// timeout only paces progress redraws and cancellation checks.
pub const DRAIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Worker thread sizing.
pub struct WorkerLimits;

impl WorkerLimits {
    /// Hard cap regardless of CPU count; conversions are external processes,
    /// so more workers than this mostly adds contention.
    pub const MAX_WORKERS: usize = 8;
    /// Used when available parallelism cannot be determined.
    pub const FALLBACK_WORKERS: usize = 4;
}
