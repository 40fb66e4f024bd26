//! Recursive resize-and-backup pipeline.
//!
//! Walks a directory tree depth-first. In every directory, each image whose
//! extension is supported and whose dimensions exceed the configured bounds is
//! backed up, shrunk in memory, written to the output subfolder, and finally
//! written over the original.
//!
//! ## Output Structure
//!
//! ```text
//! photos/
//! ├── a.jpg                  # 1600x1200 → overwritten at 800x600
//! ├── small.jpg              # 640x480, untouched
//! ├── backupimages/
//! │   └── a.jpg              # byte-identical original
//! ├── resized/               # `SubfolderName`
//! │   └── a.jpg              # 800x600 copy
//! └── 2023/
//!     ├── b.jpg
//!     ├── backupimages/      # every directory gets its own pair
//!     └── resized/
//! ```
//!
//! Backup and output folders are created lazily, the first time a directory
//! actually holds an image that needs resizing. They are never scanned
//! themselves, which is what makes a second run over the same tree a no-op.
//!
//! ## Failure Isolation
//!
//! - **File errors** (decode, backup copy, resize, save, replace) are recorded
//!   and counted; the next file is processed as usual.
//! - **Directory errors** (listing, folder creation) abandon that directory's
//!   subtree; siblings and the parent carry on.
//!
//! Every decision is reported as a [`ProcessEvent`] over an optional channel.

use crate::config::{BACKUP_FOLDER_NAME, Settings};
use crate::imaging::{CodecError, Dimensions, ImageCodec, ResizePlan, RustCodec, plan_resize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

/// Failure processing a single file. Never aborts the run.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{0}")]
    Decode(CodecError),
    #[error("backup to {} failed: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("resize failed: {0}")]
    Resize(CodecError),
    #[error("saving {} failed: {source}", path.display())]
    Save { path: PathBuf, source: CodecError },
    #[error("replacing original failed: {0}")]
    Replace(CodecError),
    #[error("path has no file name")]
    InvalidPath,
}

/// Failure that abandons a whole directory subtree.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("listing failed: {0}")]
    List(#[from] walkdir::Error),
    #[error("creating {} failed: {source}", path.display())]
    CreateFolder {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Run-time switches that don't come from the settings file.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Decode and plan, but never touch the filesystem.
    pub dry_run: bool,
}

/// Counters accumulated across the whole walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files actually resized (or, in a dry run, that would be).
    pub files_processed: usize,
    /// File failures plus abandoned directories.
    pub errors: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files processed, {} errors encountered",
            self.files_processed, self.errors
        )
    }
}

/// Which of the two per-directory folders was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderKind {
    Backup,
    Output,
}

/// Progress reported while walking the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    FolderCreated {
        kind: FolderKind,
        path: PathBuf,
    },
    Resized {
        path: PathBuf,
        original: Dimensions,
        resized: Dimensions,
        backup: PathBuf,
    },
    WithinBounds {
        path: PathBuf,
        dimensions: Dimensions,
    },
    /// The resized copy was not written because one already exists.
    OutputExists {
        path: PathBuf,
    },
    WouldResize {
        path: PathBuf,
        original: Dimensions,
        resized: Dimensions,
    },
    FileFailed {
        path: PathBuf,
        error: String,
    },
    DirectoryFailed {
        path: PathBuf,
        error: String,
    },
}

impl ProcessEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ProcessEvent::FileFailed { .. } | ProcessEvent::DirectoryFailed { .. }
        )
    }
}

/// What happened to a file that was processed without error.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    WithinBounds(Dimensions),
    Resized {
        original: Dimensions,
        resized: Dimensions,
        backup: PathBuf,
    },
    WouldResize {
        original: Dimensions,
        resized: Dimensions,
    },
}

/// Top-level entries of one directory, split by kind.
#[derive(Debug, Default)]
struct Listing {
    images: Vec<PathBuf>,
    subdirectories: Vec<PathBuf>,
}

/// List `dir` one level deep, in file-name order.
///
/// Only regular files (or symlinks to them) with a supported extension are
/// kept. Subdirectories exclude the reserved backup/output folders; symlinked
/// directories are not followed.
fn list_directory(dir: &Path, settings: &Settings) -> Result<Listing, DirectoryError> {
    let mut listing = Listing::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if !settings.is_reserved_folder(&name) {
                listing.subdirectories.push(entry.into_path());
            }
        } else if entry.path().is_file() && settings.supports(entry.path()) {
            listing.images.push(entry.into_path());
        }
    }

    Ok(listing)
}

/// The directory being processed and its derived backup/output folders.
struct DirectoryContext {
    backup_dir: PathBuf,
    output_dir: PathBuf,
    folders_ready: bool,
}

impl DirectoryContext {
    fn new(dir: &Path, settings: &Settings) -> Self {
        Self {
            backup_dir: dir.join(BACKUP_FOLDER_NAME),
            output_dir: dir.join(&settings.output_subfolder),
            folders_ready: false,
        }
    }
}

/// Process `root` and everything below it with the production codec.
pub fn process(
    root: &Path,
    settings: &Settings,
    options: &ProcessOptions,
    events: Option<&Sender<ProcessEvent>>,
) -> RunStats {
    process_with_codec(&RustCodec::new(), root, settings, options, events)
}

/// Process images using a specific codec (allows testing with mock).
pub fn process_with_codec<C: ImageCodec>(
    codec: &C,
    root: &Path,
    settings: &Settings,
    options: &ProcessOptions,
    events: Option<&Sender<ProcessEvent>>,
) -> RunStats {
    let walker = TreeWalker {
        codec,
        settings,
        options,
        events,
    };
    let mut stats = RunStats::default();
    walker.visit(root, &mut stats);
    stats
}

struct TreeWalker<'a, C> {
    codec: &'a C,
    settings: &'a Settings,
    options: &'a ProcessOptions,
    events: Option<&'a Sender<ProcessEvent>>,
}

impl<C: ImageCodec> TreeWalker<'_, C> {
    fn emit(&self, event: ProcessEvent) {
        if let Some(tx) = self.events {
            // A closed receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }

    /// Process one directory, turning a subtree failure into a counted error.
    fn visit(&self, dir: &Path, stats: &mut RunStats) {
        if let Err(e) = self.process_directory(dir, stats) {
            self.emit(ProcessEvent::DirectoryFailed {
                path: dir.to_path_buf(),
                error: e.to_string(),
            });
            stats.errors += 1;
        }
    }

    fn process_directory(&self, dir: &Path, stats: &mut RunStats) -> Result<(), DirectoryError> {
        let listing = list_directory(dir, self.settings)?;
        let mut context = DirectoryContext::new(dir, self.settings);

        for file in &listing.images {
            let outcome = match self.inspect(file) {
                Ok((_, dimensions, plan)) if !plan.resize_needed => {
                    Ok(FileOutcome::WithinBounds(dimensions))
                }
                Ok((_, dimensions, plan)) if self.options.dry_run => Ok(FileOutcome::WouldResize {
                    original: dimensions,
                    resized: plan.target(),
                }),
                Ok((image, dimensions, plan)) => {
                    self.ensure_folders(&mut context)?;
                    self.apply(file, &image, dimensions, plan, &context)
                }
                Err(e) => Err(e),
            };
            self.record(file, outcome, stats);
        }

        for subdir in &listing.subdirectories {
            self.visit(subdir, stats);
        }

        Ok(())
    }

    fn inspect(&self, file: &Path) -> Result<(C::Image, Dimensions, ResizePlan), FileError> {
        let image = self.codec.load(file).map_err(FileError::Decode)?;
        let dimensions = self.codec.dimensions(&image);
        let max = Dimensions {
            width: self.settings.max_width,
            height: self.settings.max_height,
        };
        Ok((image, dimensions, plan_resize(dimensions, max)))
    }

    fn ensure_folders(&self, context: &mut DirectoryContext) -> Result<(), DirectoryError> {
        if context.folders_ready {
            return Ok(());
        }
        for (kind, path) in [
            (FolderKind::Backup, &context.backup_dir),
            (FolderKind::Output, &context.output_dir),
        ] {
            if !path.is_dir() {
                fs::create_dir_all(path).map_err(|source| DirectoryError::CreateFolder {
                    path: path.clone(),
                    source,
                })?;
                self.emit(ProcessEvent::FolderCreated {
                    kind,
                    path: path.clone(),
                });
            }
        }
        context.folders_ready = true;
        Ok(())
    }

    /// Back up, resize, write the copy, then replace the original.
    ///
    /// The backup is complete before either write happens, so a failure at any
    /// later step still leaves the untouched original in `backupimages/`.
    fn apply(
        &self,
        file: &Path,
        image: &C::Image,
        original: Dimensions,
        plan: ResizePlan,
        context: &DirectoryContext,
    ) -> Result<FileOutcome, FileError> {
        let file_name = file.file_name().ok_or(FileError::InvalidPath)?;

        let backup = context.backup_dir.join(file_name);
        fs::copy(file, &backup).map_err(|source| FileError::Backup {
            path: backup.clone(),
            source,
        })?;

        let resized = self
            .codec
            .resize(image, plan.width, plan.height)
            .map_err(FileError::Resize)?;

        let output = context.output_dir.join(file_name);
        if self.settings.overwrite_existing || !output.exists() {
            self.codec
                .save(&resized, &output)
                .map_err(|source| FileError::Save {
                    path: output.clone(),
                    source,
                })?;
        } else {
            self.emit(ProcessEvent::OutputExists { path: output });
        }

        self.codec
            .save(&resized, file)
            .map_err(FileError::Replace)?;

        Ok(FileOutcome::Resized {
            original,
            resized: plan.target(),
            backup,
        })
    }

    fn record(&self, file: &Path, outcome: Result<FileOutcome, FileError>, stats: &mut RunStats) {
        let path = file.to_path_buf();
        let event = match outcome {
            Ok(FileOutcome::WithinBounds(dimensions)) => {
                ProcessEvent::WithinBounds { path, dimensions }
            }
            Ok(FileOutcome::Resized {
                original,
                resized,
                backup,
            }) => {
                stats.files_processed += 1;
                ProcessEvent::Resized {
                    path,
                    original,
                    resized,
                    backup,
                }
            }
            Ok(FileOutcome::WouldResize { original, resized }) => {
                stats.files_processed += 1;
                ProcessEvent::WouldResize {
                    path,
                    original,
                    resized,
                }
            }
            Err(e) => {
                stats.errors += 1;
                ProcessEvent::FileFailed {
                    path,
                    error: e.to_string(),
                }
            }
        };
        self.emit(event);
    }
}
