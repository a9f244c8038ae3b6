//! Image file input and output.
//!
//! The output format follows the file extension: `.png` is lossless, `.jpg`
//! and `.jpeg` are written at quality 100.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{BrickError, Result};

/// JPEG quality used for lossy output.
pub const JPEG_QUALITY: u8 = 100;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            _ => Err(BrickError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }
}

/// Decode an image file.
pub fn read_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| BrickError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Encode an image to `path`.
pub fn write_image(image: &RgbaImage, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;

    let io_error = |e: &dyn std::fmt::Display| BrickError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write image: {}", e),
    };

    match format {
        OutputFormat::Png => image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| io_error(&e))?,
        OutputFormat::Jpeg => {
            let file = File::create(path).map_err(|e| io_error(&e))?;
            let mut writer = BufWriter::new(file);
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .encode_image(&rgb)
                .map_err(|e| io_error(&e))?;
        }
    }

    Ok(())
}
