// SPDX-License-Identifier: MPL-2.0
//! Encoding the composited collage to JPEG or PNG.

use crate::collage::raster::to_straight_rgba;
use crate::config::DEFAULT_EXPORT_STEM;
use crate::domain::collage::ExportQuality;
use crate::error::{Error, Result};
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Output formats offered by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// JPEG format (lossy, honours the quality setting).
    #[default]
    Jpeg,
    /// PNG format (lossless).
    Png,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Jpeg, ExportFormat::Png];

    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
        }
    }

    /// Name proposed by the save dialog, e.g. `collage.jpg`.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("{DEFAULT_EXPORT_STEM}.{}", self.extension())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "JPEG",
            ExportFormat::Png => "PNG",
        }
    }

    /// Detects format from file path extension.
    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "png" => Some(ExportFormat::Png),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Encodes a rendered collage.
///
/// `quality` only affects JPEG. JPEG output drops the alpha channel; the
/// collage background is opaque so nothing is lost.
///
/// # Errors
///
/// Returns [`Error::Export`] if the encoder fails.
pub fn encode(
    pixmap: &tiny_skia::Pixmap,
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<Vec<u8>> {
    let rgba = RgbaImage::from_raw(pixmap.width(), pixmap.height(), to_straight_rgba(pixmap))
        .ok_or_else(|| Error::Export("pixel buffer does not match raster size".into()))?;

    let mut bytes = Vec::new();
    match format {
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, quality.value())
                .encode_image(&rgb)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
        ExportFormat::Png => {
            rgba.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
    }
    Ok(bytes)
}

/// Encodes and writes a rendered collage to `path`.
///
/// # Errors
///
/// Returns [`Error::Export`] if encoding fails or [`Error::Io`] if the file
/// cannot be written.
pub fn save_to_file<P: AsRef<Path>>(
    pixmap: &tiny_skia::Pixmap,
    path: P,
    format: ExportFormat,
    quality: ExportQuality,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(pixmap, format, quality)?;
    std::fs::write(path, &bytes)?;
    tracing::info!(
        path = %path.display(),
        format = format.label(),
        quality = quality.value(),
        bytes = bytes.len(),
        "collage exported"
    );
    Ok(())
}
