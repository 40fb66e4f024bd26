//! CLI output formatting for pipeline events.
//!
//! Every decision the pipeline makes becomes exactly one log line. The
//! wording narrates what happened to which file:
//!
//! ```text
//! Created backup folder: photos/backupimages
//! Created subfolder for resized images: photos/resized
//! Resized: photos/a.jpg from 1600x1200 to 800x600. Backup saved to photos/backupimages/a.jpg
//! Skipped resizing photos/small.jpg as it does not exceed the specified dimensions (640x480).
//! Skipped saving photos/resized/a.jpg as it already exists.
//! Error processing file photos/b.jpg: Decode failed: ...
//! Image resizing completed. 1 files processed, 1 errors encountered.
//! ```
//!
//! # Architecture
//!
//! [`format_process_event`] and [`format_summary`] are pure — no I/O, no side
//! effects — so the wording is unit tested. [`log_event`] is the thin wrapper
//! that hands a formatted line to the `log` facade at the right level.

use crate::process::{FolderKind, ProcessEvent, RunStats};

/// Format a single pipeline event as a log message.
pub fn format_process_event(event: &ProcessEvent) -> String {
    match event {
        ProcessEvent::FolderCreated {
            kind: FolderKind::Backup,
            path,
        } => format!("Created backup folder: {}", path.display()),
        ProcessEvent::FolderCreated {
            kind: FolderKind::Output,
            path,
        } => format!("Created subfolder for resized images: {}", path.display()),
        ProcessEvent::Resized {
            path,
            original,
            resized,
            backup,
        } => format!(
            "Resized: {} from {} to {}. Backup saved to {}",
            path.display(),
            original,
            resized,
            backup.display()
        ),
        ProcessEvent::WithinBounds { path, dimensions } => format!(
            "Skipped resizing {} as it does not exceed the specified dimensions ({}).",
            path.display(),
            dimensions
        ),
        ProcessEvent::OutputExists { path } => {
            format!("Skipped saving {} as it already exists.", path.display())
        }
        ProcessEvent::WouldResize {
            path,
            original,
            resized,
        } => format!(
            "Would resize: {} from {} to {}",
            path.display(),
            original,
            resized
        ),
        ProcessEvent::FileFailed { path, error } => {
            format!("Error processing file {}: {}", path.display(), error)
        }
        ProcessEvent::DirectoryFailed { path, error } => {
            format!("Error processing folder {}: {}", path.display(), error)
        }
    }
}

/// Final summary line, emitted once after the whole walk.
pub fn format_summary(stats: &RunStats, dry_run: bool) -> String {
    if dry_run {
        format!(
            "Dry run completed. {} files would be resized, {} errors encountered.",
            stats.files_processed, stats.errors
        )
    } else {
        format!("Image resizing completed. {}.", stats)
    }
}

/// Log an event: failures at `error`, everything else at `info`.
pub fn log_event(event: &ProcessEvent) {
    let line = format_process_event(event);
    if event.is_failure() {
        log::error!("{line}");
    } else {
        log::info!("{line}");
    }
}
