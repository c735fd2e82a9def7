//! Progress bar helpers.

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

/// Shared handle to the run's progress bar.
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Create a bar for `total` jobs. The coordinator drives it from the drain
/// tick, so it redraws at most once per second.
pub fn create_progress_bar(total: usize, desc: &'static str) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = total,
        desc = desc,
        animation = Animation::Classic,
        unit = " files"
    )))
}

/// Advance the bar by `n`. Uses try_lock so a contended bar is skipped
/// rather than blocking the caller; the count catches up on the next tick.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if n == 0 {
        return;
    }
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.update(n);
    }
}

/// Force a redraw (e.g. so "0/N" shows before the first completion).
pub fn refresh_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.refresh();
    }
}
