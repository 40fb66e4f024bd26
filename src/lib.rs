//! # Resize Images
//!
//! Walks a folder tree and shrinks every photo that is larger than a
//! configured bounding box, keeping the aspect ratio. Before an original is
//! overwritten it is copied into a `backupimages/` folder next to it, and a
//! second copy of the resized image is written into a configurable output
//! folder.
//!
//! # Architecture: One Recursive Pass
//!
//! ```text
//! appsettings.json ─→ Settings ─┐
//!                               ├─→ process(root) ─→ ProcessEvent* ─→ log lines
//! folder tree ──────────────────┘         │
//!                                         └──────→ RunStats ─→ summary line
//! ```
//!
//! The pass is single-threaded and depth-first: files of a directory first,
//! then each subdirectory. Per-file failures are values, not panics, so one
//! bad JPEG never stops the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `appsettings.json` loading and validation into [`config::Settings`] |
//! | [`imaging`] | Resize math ([`imaging::plan_resize`]) and the [`imaging::ImageCodec`] seam |
//! | [`process`] | The tree walk: backup, resize, write copy, replace original |
//! | [`output`] | Event and summary formatting |
//! | [`logging`] | `<timestamp>: <message>` logger writing to stdout and an optional file |
//!
//! # Design Decisions
//!
//! ## Folders Per Directory, Created Lazily
//!
//! Each directory that holds an oversized image gets its own `backupimages/`
//! and output folder, created the first time they are needed. Directories
//! whose images already fit are left exactly as they were. Both folder names
//! are skipped during the walk, so running the tool twice resizes nothing the
//! second time.
//!
//! ## Backup Before Replace
//!
//! The backup copy is made before any pixel is written. If the resize, the
//! copy, or the in-place write fails, the original bytes are still in
//! `backupimages/`.
//!
//! ## Truncating Resize Math
//!
//! Target sizes are truncated, never rounded up, so the result can never
//! poke one pixel past the bounding box.

pub mod config;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
