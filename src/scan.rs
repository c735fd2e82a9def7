//! Directory scan: find convertible files one level deep and feed the queue.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

use crate::queue::JobQueue;
use crate::types::Job;

/// True when the extension is on the convertible allow-list
/// (case-insensitive; audio, video, and image formats).
pub fn is_convertible(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(
                ext.as_str(),
                "mp3" | "wav" | "flac" | "aac" | "ogg"                          // audio
                    | "mp4" | "mkv" | "avi" | "mov" | "flv" | "wmv"             // video
                    | "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tiff" | "webp"  // image
            )
        }
        None => false,
    }
}

/// Enumerate the top level of `root` and enqueue one job per convertible
/// regular file. Subdirectories are skipped by design, not descended into.
///
/// Returns the number of jobs successfully enqueued; this becomes the run's
/// total. An unreadable `root` is fatal; every other per-entry problem is
/// logged and skipped. When `cancel` flips, the scan stops producing and
/// returns what it enqueued so far.
pub fn scan_dir(root: &Path, queue: &JobQueue, cancel: Option<&AtomicBool>) -> Result<usize> {
    let mut found = 0_usize;
    let mut next_id = 0_u64;

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) {
            debug!("scan cancelled after {found} files");
            break;
        }
        let entry = match entry {
            Ok(entry) => entry,
            // An error on the target directory itself means it could not be
            // opened at all.
            Err(err) if err.depth() == 0 || err.path() == Some(root) => {
                return Err(err)
                    .with_context(|| format!("cannot open directory {}", root.display()));
            }
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let is_file = entry.file_type().is_file();
        let path = entry.into_path();
        if !is_file {
            debug!("skipping non-regular entry: {}", path.display());
            continue;
        }
        if !is_convertible(&path) {
            info!("skipping unsupported file: {}", path.display());
            continue;
        }

        next_id += 1;
        match queue.enqueue(Job { path, id: next_id }) {
            Ok(()) => found += 1,
            Err(job) => warn!(
                "queue shut down, could not enqueue {}",
                job.path.display()
            ),
        }
    }

    Ok(found)
}
