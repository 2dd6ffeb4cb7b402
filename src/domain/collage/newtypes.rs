// SPDX-License-Identifier: MPL-2.0
//! Collage newtypes.
//!
//! Type-safe wrappers for per-image adjustment values and collage settings,
//! guaranteeing every stored value sits inside its valid range.

use crate::config::{
    DEFAULT_EXPORT_QUALITY, DEFAULT_FRAME_WIDTH, MAX_EXPORT_QUALITY, MAX_FRAME_WIDTH,
    MIN_EXPORT_QUALITY, MIN_FRAME_WIDTH,
};

// =============================================================================
// Adjustment Bounds
// =============================================================================

/// Pan and zoom bounds for a per-image adjustment.
pub mod adjustment_bounds {
    /// Minimum pan offset, as a percentage of the maximum pan.
    pub const MIN_OFFSET: f32 = -100.0;
    /// Maximum pan offset, as a percentage of the maximum pan.
    pub const MAX_OFFSET: f32 = 100.0;
    /// Minimum zoom multiplier over the cover scale.
    pub const MIN_ZOOM: f32 = 0.5;
    /// Maximum zoom multiplier over the cover scale.
    pub const MAX_ZOOM: f32 = 3.0;
    /// Zoom of an unadjusted image.
    pub const DEFAULT_ZOOM: f32 = 1.0;
}

// =============================================================================
// OffsetPercent
// =============================================================================

/// Pan offset, guaranteed to be within [-100, 100].
///
/// The value is relative to the maximum pan available at the current zoom,
/// not an absolute pixel distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetPercent(f32);

impl OffsetPercent {
    /// Creates a new offset, clamping to the valid range. NaN maps to 0.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        if percent.is_nan() {
            return Self::default();
        }
        Self(percent.clamp(adjustment_bounds::MIN_OFFSET, adjustment_bounds::MAX_OFFSET))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the offset as a fraction in [-1, 1].
    #[must_use]
    pub fn as_fraction(self) -> f32 {
        self.0 / 100.0
    }

    /// Shifts the offset by `delta` percentage points.
    #[must_use]
    pub fn shifted(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }
}

// =============================================================================
// ZoomFactor
// =============================================================================

/// Zoom multiplier over the minimum cover scale, guaranteed to be within [0.5, 3.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping to the valid range. NaN maps to 1.0.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(adjustment_bounds::MIN_ZOOM, adjustment_bounds::MAX_ZOOM))
    }

    /// Returns the raw multiplier.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the image is zoomed past its cover scale.
    ///
    /// Single-finger panning on touch devices is only available in this state.
    #[must_use]
    pub fn is_zoomed_in(self) -> bool {
        self.0 > adjustment_bounds::DEFAULT_ZOOM
    }

    /// Adds `delta` to the zoom, clamping the result.
    #[must_use]
    pub fn offset_by(self, delta: f32) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(adjustment_bounds::DEFAULT_ZOOM)
    }
}

// =============================================================================
// FrameWidth
// =============================================================================

/// Output frame width in pixels, guaranteed to be within 400–2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameWidth(f32);

impl FrameWidth {
    /// Creates a new frame width, clamping and rounding to whole pixels.
    #[must_use]
    pub fn new(width: f32) -> Self {
        if !width.is_finite() {
            return Self::default();
        }
        Self(width.round().clamp(MIN_FRAME_WIDTH, MAX_FRAME_WIDTH))
    }

    /// Returns the width in pixels.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for FrameWidth {
    fn default() -> Self {
        Self(DEFAULT_FRAME_WIDTH)
    }
}

// =============================================================================
// ExportQuality
// =============================================================================

/// JPEG export quality, guaranteed to be within 10–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportQuality(u8);

impl ExportQuality {
    /// Creates a new quality value, clamping to the valid range.
    #[must_use]
    pub fn new(quality: u8) -> Self {
        Self(quality.clamp(MIN_EXPORT_QUALITY, MAX_EXPORT_QUALITY))
    }

    /// Returns the raw quality value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ExportQuality {
    fn default() -> Self {
        Self(DEFAULT_EXPORT_QUALITY)
    }
}
