// SPDX-License-Identifier: MPL-2.0
//! Image decoding, the decoded-bitmap cache and collage export.

pub mod cache;
pub mod export;
pub mod image;

pub use cache::{BitmapCache, LoadState};
pub use export::ExportFormat;
pub use image::{decode_bytes, load_image, load_image_async, DecodedImage};

/// Supported media extensions
pub mod extensions {
    /// Image file extensions accepted by the file dialog and window drops.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "ico",
    ];
}

/// Returns whether `path` has a supported image extension.
pub fn is_supported_image(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions::IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
