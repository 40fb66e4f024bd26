//! Shared test utilities for the resize-images test suite.
//!
//! Provides synthetic image writers, a scenario settings builder, and event
//! collection helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("a.jpg"), 1600, 1200);
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! let stats = process(tmp.path(), &scenario_settings(), &ProcessOptions::default(), Some(&tx));
//! let events = drain_events(rx);
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::Path;
use std::sync::mpsc::Receiver;

use crate::config::{Settings, parse_settings};
use crate::process::ProcessEvent;

// =========================================================================
// Fixture setup
// =========================================================================

/// Settings used throughout the tests: 800x600 bounds, `.jpg` only, output
/// into `resized/`, overwriting earlier copies.
pub fn scenario_settings() -> Settings {
    parse_settings(
        r#"{
            "MaxWidth": 800,
            "MaxHeight": 600,
            "SupportedFileTypes": [".jpg"],
            "SubfolderName": "resized",
            "OverwriteExisting": true
        }"#,
    )
    .unwrap()
}

/// Like [`scenario_settings`] but with an explicit overwrite flag.
pub fn settings_with_overwrite(overwrite_existing: bool) -> Settings {
    Settings {
        overwrite_existing,
        ..scenario_settings()
    }
}

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

// =========================================================================
// Event helpers
// =========================================================================

/// Collect every event sent so far. Senders must be dropped or idle.
pub fn drain_events(rx: Receiver<ProcessEvent>) -> Vec<ProcessEvent> {
    rx.try_iter().collect()
}

/// All files listed under `dir`, relative to it, sorted. Directories omitted.
pub fn file_set(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(dir)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
