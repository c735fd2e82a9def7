use convoy::{ConvertError, Converter, Opts, convert_dir};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

struct AlwaysOk;

impl Converter for AlwaysOk {
    fn convert(&self, _path: &Path) -> Result<(), ConvertError> {
        Ok(())
    }
}

/// Fails for any path whose file name contains the needle.
struct FailMatching(&'static str);

impl Converter for FailMatching {
    fn convert(&self, path: &Path) -> Result<(), ConvertError> {
        if path.to_string_lossy().contains(self.0) {
            Err(ConvertError::Exit(3))
        } else {
            Ok(())
        }
    }
}

/// Succeeds after a short delay, to keep the queue saturated under stress.
struct SlowOk(Duration);

impl Converter for SlowOk {
    fn convert(&self, _path: &Path) -> Result<(), ConvertError> {
        std::thread::sleep(self.0);
        Ok(())
    }
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

#[test]
fn test_empty_directory_completes_with_zero_total() {
    let dir = TempDir::new().unwrap();
    let summary = convert_dir(dir.path(), &Opts::default(), Arc::new(AlwaysOk), None).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.completed, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_unsupported_files_are_skipped_not_failed() {
    let dir = TempDir::new().unwrap();
    for i in 0..5 {
        touch(dir.path(), &format!("notes-{i}.txt"));
    }
    let summary = convert_dir(dir.path(), &Opts::default(), Arc::new(AlwaysOk), None).unwrap();
    assert_eq!(summary.total, 0);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_all_conversions_succeed() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "a.mp3");
    touch(dir.path(), "b.mp4");
    touch(dir.path(), "c.png");

    let summary = convert_dir(dir.path(), &Opts::default(), Arc::new(AlwaysOk), None).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.successful(), 3);
}

#[test]
fn test_single_failure_is_counted_and_isolated() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "good-1.mp3");
    touch(dir.path(), "good-2.mp3");
    touch(dir.path(), "bad.mp3");
    touch(dir.path(), "good-3.mp3");

    let summary = convert_dir(
        dir.path(),
        &Opts::default(),
        Arc::new(FailMatching("bad")),
        None,
    )
    .unwrap();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.completed, 4, "a failed job still completes");
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.successful(), 3);
}

#[test]
fn test_more_files_than_queue_capacity_does_not_deadlock() {
    let dir = TempDir::new().unwrap();
    for i in 0..24 {
        touch(dir.path(), &format!("clip-{i:02}.mkv"));
    }

    let opts = Opts {
        workers: Some(2),
        queue_capacity: Some(4),
        ..Opts::default()
    };
    let summary = convert_dir(
        dir.path(),
        &opts,
        Arc::new(SlowOk(Duration::from_millis(2))),
        None,
    )
    .unwrap();
    assert_eq!(summary.total, 24);
    assert_eq!(summary.completed, 24);
    assert_eq!(summary.failed, 0);
}

#[test]
fn test_missing_directory_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("missing");
    assert!(convert_dir(&gone, &Opts::default(), Arc::new(AlwaysOk), None).is_err());
}

#[test]
fn test_independent_runs_do_not_share_state() {
    // The queue, stats, and pool are per-run context, not process globals.
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();
    touch(dir_a.path(), "a.mp3");
    touch(dir_b.path(), "b.mp3");
    touch(dir_b.path(), "c.mp3");

    let first = convert_dir(dir_a.path(), &Opts::default(), Arc::new(AlwaysOk), None).unwrap();
    let second = convert_dir(dir_b.path(), &Opts::default(), Arc::new(AlwaysOk), None).unwrap();
    assert_eq!(first.total, 1);
    assert_eq!(second.total, 2);
}
