//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait defines the four operations the resize pipeline
//! needs: load, dimensions, resize, and save. Nothing outside this module
//! touches pixels.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec) — pure Rust, built on the
//! `image` crate. Tests swap in a recording mock.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Unsupported output format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Trait for image codecs.
///
/// `load` decodes a file into memory; `resize` produces a new in-memory image
/// of exactly the requested size; `save` encodes to the format implied by the
/// destination extension, replacing any existing file.
pub trait ImageCodec {
    /// Decoded, in-memory image.
    type Image;

    /// Decode an image from disk.
    fn load(&self, path: &Path) -> Result<Self::Image, CodecError>;

    /// Dimensions of a decoded image.
    fn dimensions(&self, image: &Self::Image) -> Dimensions;

    /// Resample to exactly `width` x `height`.
    fn resize(
        &self,
        image: &Self::Image,
        width: u32,
        height: u32,
    ) -> Result<Self::Image, CodecError>;

    /// Encode and write to `path`, overwriting it if present.
    fn save(&self, image: &Self::Image, path: &Path) -> Result<(), CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Mock codec that stores images as `WIDTHxHEIGHT` text files.
    ///
    /// Files whose contents don't parse fail to decode, which lets tests plant
    /// corrupt images next to good ones. Every call is recorded.
    #[derive(Default)]
    pub struct MockCodec {
        pub operations: Mutex<Vec<RecordedOp>>,
        /// Saves to paths containing this fragment fail.
        pub fail_saves_matching: Option<String>,
        /// Saves to exactly this path fail.
        pub fail_saves_at: Option<PathBuf>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Load(String),
        Resize { width: u32, height: u32 },
        Save { path: String, width: u32, height: u32 },
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_saves(fragment: &str) -> Self {
            Self {
                fail_saves_matching: Some(fragment.to_string()),
                ..Self::default()
            }
        }

        pub fn failing_saves_at(path: &Path) -> Self {
            Self {
                fail_saves_at: Some(path.to_path_buf()),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn loaded_paths(&self) -> Vec<String> {
            self.get_operations()
                .into_iter()
                .filter_map(|op| match op {
                    RecordedOp::Load(p) => Some(p),
                    _ => None,
                })
                .collect()
        }
    }

    /// Write a mock image file understood by [`MockCodec`].
    pub fn write_mock_image(path: &Path, width: u32, height: u32) {
        std::fs::write(path, format!("{width}x{height}")).unwrap();
    }

    /// Read back the dimensions of a mock image file.
    pub fn read_mock_image(path: &Path) -> Dimensions {
        parse_mock(&std::fs::read_to_string(path).unwrap())
            .unwrap_or_else(|| panic!("not a mock image: {}", path.display()))
    }

    fn parse_mock(content: &str) -> Option<Dimensions> {
        let (w, h) = content.trim().split_once('x')?;
        Some(Dimensions {
            width: w.parse().ok()?,
            height: h.parse().ok()?,
        })
    }

    impl ImageCodec for MockCodec {
        type Image = Dimensions;

        fn load(&self, path: &Path) -> Result<Dimensions, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Load(path.to_string_lossy().to_string()));

            let bytes = std::fs::read(path)?;
            parse_mock(&String::from_utf8_lossy(&bytes))
                .ok_or_else(|| CodecError::Decode(format!("not a mock image: {}", path.display())))
        }

        fn dimensions(&self, image: &Dimensions) -> Dimensions {
            *image
        }

        fn resize(
            &self,
            _image: &Dimensions,
            width: u32,
            height: u32,
        ) -> Result<Dimensions, CodecError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Resize { width, height });
            Ok(Dimensions { width, height })
        }

        fn save(&self, image: &Dimensions, path: &Path) -> Result<(), CodecError> {
            let path_str = path.to_string_lossy().to_string();
            self.operations.lock().unwrap().push(RecordedOp::Save {
                path: path_str.clone(),
                width: image.width,
                height: image.height,
            });
            if let Some(fragment) = &self.fail_saves_matching {
                if path_str.contains(fragment.as_str()) {
                    return Err(CodecError::Encode("disk full".to_string()));
                }
            }
            if self.fail_saves_at.as_deref() == Some(path) {
                return Err(CodecError::Encode("read-only file".to_string()));
            }
            std::fs::write(path, image.to_string())?;
            Ok(())
        }
    }

    #[test]
    fn mock_roundtrips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("a.jpg");
        write_mock_image(&path, 1600, 1200);

        let codec = MockCodec::new();
        let image = codec.load(&path).unwrap();
        assert_eq!(codec.dimensions(&image), Dimensions { width: 1600, height: 1200 });

        let resized = codec.resize(&image, 800, 600).unwrap();
        codec.save(&resized, &path).unwrap();
        assert_eq!(read_mock_image(&path), Dimensions { width: 800, height: 600 });

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 3);
        assert!(matches!(&ops[0], RecordedOp::Load(p) if p.ends_with("a.jpg")));
        assert_eq!(ops[1], RecordedOp::Resize { width: 800, height: 600 });
    }

    #[test]
    fn mock_rejects_garbage() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"\xff\xd8 definitely not a jpeg").unwrap();

        let result = MockCodec::new().load(&path);
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn dimensions_display() {
        assert_eq!(Dimensions { width: 800, height: 600 }.to_string(), "800x600");
    }
}
