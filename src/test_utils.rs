// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and other common test helpers.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

use crate::media::DecodedImage;

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-4;

/// Builds an opaque single-color bitmap.
pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
    let pixels = (0..width * height)
        .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
        .collect();
    DecodedImage::from_rgba(width, height, pixels).expect("valid test image")
}
