//! Run orchestration: wire the queue, stats, and worker pool together.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::cli::Cli;
use crate::convert::{Converter, ScriptConverter};
use crate::pool::{WorkerPool, worker_count};
use crate::progress::{ProgressBar, create_progress_bar, refresh_bar, update_progress_bar};
use crate::queue::JobQueue;
use crate::scan::scan_dir;
use crate::stats::{RunStats, StatsSnapshot};
use crate::types::Opts;
use crate::utils::config::{DEFAULT_QUEUE_CAPACITY, DRAIN_POLL_INTERVAL};
use crate::utils::setup_logging;

/// Shared structures for one conversion run. Built once at startup and
/// handed to the scanner and the workers; nothing here is process-global,
/// so independent runs can coexist in one process.
pub struct RunContext {
    pub queue: Arc<JobQueue>,
    pub stats: Arc<RunStats>,
}

impl RunContext {
    pub fn new(opts: &Opts) -> Self {
        let capacity = opts.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY);
        Self {
            queue: Arc::new(JobQueue::new(capacity)),
            stats: Arc::new(RunStats::new()),
        }
    }
}

/// CLI entry: set up logging and cancellation, run the conversion, and map
/// the aggregate outcome onto the process exit code.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);

    // Fatal startup check, before any worker exists.
    std::fs::read_dir(&cli.dir)
        .with_context(|| format!("cannot open directory {}", cli.dir.display()))?;

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = Arc::clone(&cancel);
    ctrlc::set_handler(move || {
        cancel_handler.store(true, Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;

    let opts = Opts {
        workers: cli.workers,
        queue_capacity: None,
        report: true,
        verbose: cli.verbose,
    };
    let converter = Arc::new(ScriptConverter::new(cli.script_path()));
    let summary = convert_dir(&cli.dir, &opts, converter, Some(Arc::clone(&cancel)))?;

    if cancel.load(Ordering::Relaxed) {
        anyhow::bail!(
            "conversion cancelled by user; {} of {} jobs completed",
            summary.completed,
            summary.total
        );
    }
    if summary.failed > 0 {
        anyhow::bail!("{} of {} conversions failed", summary.failed, summary.total);
    }
    Ok(())
}

/// Convert every supported file in the top level of `root` with `converter`.
///
/// Spawns the worker pool, scans `root` on the calling thread while workers
/// drain concurrently, waits until every enqueued job has completed, then
/// shuts the queue down and joins the pool. In-flight conversions always run
/// to completion; shutdown only stops dispatch of new jobs.
///
/// Returns the final counters. The caller decides what an aggregate failure
/// means ([`handle_run`] maps `failed > 0` to exit code 1).
pub fn convert_dir(
    root: &Path,
    opts: &Opts,
    converter: Arc<dyn Converter>,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<StatsSnapshot> {
    debug!("{} config: {opts:?}", env!("CARGO_PKG_NAME"));

    let ctx = RunContext::new(opts);
    let workers = worker_count(opts.workers);
    debug!("using {workers} worker threads");

    let pool = WorkerPool::spawn(
        workers,
        Arc::clone(&ctx.queue),
        Arc::clone(&ctx.stats),
        converter,
    )?;

    let found = match scan_dir(root, &ctx.queue, cancel.as_deref()) {
        Ok(found) => found,
        Err(err) => {
            // Release any idle workers before propagating the fatal error.
            ctx.queue.request_shutdown();
            let _ = pool.join();
            return Err(err);
        }
    };
    ctx.stats.set_total(found);

    if found == 0 {
        if opts.report {
            println!("no convertible files found in {}", root.display());
        }
    } else {
        info!("queued {found} files for conversion");
        drain(&ctx, opts, found, cancel.as_deref());
    }

    ctx.queue.request_shutdown();
    pool.join()?;

    let snapshot = ctx.stats.snapshot();
    if opts.report && found > 0 {
        print_summary(&snapshot);
    }
    Ok(snapshot)
}

/// Wait until every known job has completed. Wakes on the stats completion
/// signal; the timeout tick only paces progress redraws and observes
/// cancellation.
fn drain(ctx: &RunContext, opts: &Opts, total: usize, cancel: Option<&AtomicBool>) {
    let bar = opts.report.then(|| {
        let bar = create_progress_bar(total, "converting");
        refresh_bar(&bar);
        bar
    });
    let mut shown = 0_usize;

    loop {
        let done = ctx.stats.wait_done(DRAIN_POLL_INTERVAL);
        if let Some(bar) = &bar {
            let snapshot = ctx.stats.snapshot();
            update_progress_bar(bar, snapshot.completed - shown);
            shown = snapshot.completed;
        }
        if done {
            break;
        }
        if let Some(cancel) = cancel
            && cancel.load(Ordering::Relaxed)
        {
            warn!("cancellation requested, stopping dispatch of new jobs");
            ctx.queue.request_shutdown();
            break;
        }
    }

    if let Some(bar) = &bar {
        finish_bar(ctx, bar, shown);
    }
}

/// Catch the bar up to the final count and move the cursor off its line.
fn finish_bar(ctx: &RunContext, bar: &ProgressBar, shown: usize) {
    let snapshot = ctx.stats.snapshot();
    update_progress_bar(bar, snapshot.completed - shown);
    eprintln!();
}

/// Human-readable report, printed exactly once after the drain completes.
fn print_summary(s: &StatsSnapshot) {
    println!();
    println!("=== conversion summary ===");
    println!("total files:  {}", s.total);
    println!("successful:   {}", s.successful());
    println!("failed:       {}", s.failed);
    println!("elapsed:      {:.1}s", s.elapsed.as_secs_f64());
    println!("average rate: {:.2} files/sec", s.rate());
    println!("success rate: {:.1}%", s.success_rate());
}
