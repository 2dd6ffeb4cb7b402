// SPDX-License-Identifier: MPL-2.0
//! Image decoding for collage sources (PNG, JPEG, GIF, WebP, etc.).

use crate::error::{Error, Result};
use iced::widget::image;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded source image, ready both for the raster pipeline and for iced.
#[derive(Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha handle for iced image widgets (thumbnails).
    pub handle: image::Handle,
    /// Premultiplied pixels for the raster pipeline.
    /// Stored in Arc to avoid expensive cloning.
    pixmap: Arc<tiny_skia::Pixmap>,
}

impl DecodedImage {
    /// Creates a `DecodedImage` from straight RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if either dimension is zero or the buffer
    /// length does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Decode("image has empty dimensions".into()));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::Decode(format!(
                "expected {expected} bytes of RGBA, got {}",
                pixels.len()
            )));
        }

        let premultiplied: Vec<u8> = pixels
            .chunks_exact(4)
            .flat_map(|px| {
                let color = tiny_skia::ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect();
        let size = tiny_skia::IntSize::from_wh(width, height)
            .ok_or_else(|| Error::Decode("image has empty dimensions".into()))?;
        let pixmap = tiny_skia::Pixmap::from_vec(premultiplied, size)
            .ok_or_else(|| Error::Decode("failed to allocate pixmap".into()))?;

        Ok(Self {
            width,
            height,
            handle: image::Handle::from_rgba(width, height, pixels),
            pixmap: Arc::new(pixmap),
        })
    }

    /// Premultiplied pixels.
    #[must_use]
    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }

    /// Natural size as floats, for geometry.
    #[must_use]
    pub fn natural_size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Decodes an encoded image (any format enabled on the `image` crate).
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a supported image or the
/// image is empty.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage> {
    let img = image_rs::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_rgba(width, height, rgba.into_raw())
}

/// Reads and decodes the image at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, otherwise the errors of
/// [`decode_bytes`].
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DecodedImage> {
    let bytes = fs::read(path.as_ref())?;
    decode_bytes(&bytes)
}

/// Decodes `path` on the blocking thread pool.
pub async fn load_image_async(path: PathBuf) -> Result<DecodedImage> {
    let started = std::time::Instant::now();
    let result = tokio::task::spawn_blocking(move || load_image(&path))
        .await
        .map_err(|e| Error::Decode(format!("decode task failed: {e}")))?;
    if let Ok(image) = &result {
        tracing::debug!(
            width = image.width,
            height = image.height,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "image decoded"
        );
    }
    result
}
