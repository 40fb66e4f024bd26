//! Production codec built on the `image` crate.
//!
//! Decodes by sniffing file contents, scales with Lanczos3, and re-encodes in
//! the format named by the destination's extension.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode | `image::DynamicImage::save_with_format`, format from the destination extension |
//!
//! The output format always follows the destination path, so a `.jpg` stays a
//! JPEG. JPEG has no alpha channel and only 8-bit encoders, so anything else
//! is flattened to RGB8 before encoding.

use super::backend::{CodecError, Dimensions, ImageCodec};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

/// Codec backed by the `image` crate.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for RustCodec {
    type Image = DynamicImage;

    fn load(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| CodecError::Decode(format!("{}: {}", path.display(), e)))
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions {
            width: image.width(),
            height: image.height(),
        }
    }

    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, CodecError> {
        Ok(image.resize_exact(width, height, FilterType::Lanczos3))
    }

    fn save(&self, image: &DynamicImage, path: &Path) -> Result<(), CodecError> {
        let format = ImageFormat::from_path(path)
            .map_err(|_| CodecError::UnsupportedFormat(path.to_path_buf()))?;

        let result = match format {
            ImageFormat::Jpeg if !matches!(image.color(), ColorType::L8 | ColorType::Rgb8) => {
                DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)
            }
            _ => image.save_with_format(path, format),
        };
        result.map_err(|e| CodecError::Encode(format!("{}: {}", path.display(), e)))
    }
}
