// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Frame**: Output width bounds and presets
//! - **Spacing**: Gap and margin bounds
//! - **Grid**: Custom layout dimension bounds
//! - **Export**: Encoder quality bounds and default file name
//! - **Gestures**: Drag, wheel and pinch tuning

// ==========================================================================
// Frame Defaults
// ==========================================================================

/// Default output frame width in pixels.
pub const DEFAULT_FRAME_WIDTH: f32 = 800.0;

/// Minimum output frame width in pixels.
pub const MIN_FRAME_WIDTH: f32 = 400.0;

/// Maximum output frame width in pixels.
pub const MAX_FRAME_WIDTH: f32 = 2000.0;

/// Width applied by the "fit for Instagram" shortcut.
pub const INSTAGRAM_FRAME_WIDTH: f32 = 1080.0;

/// Slider step for the frame width control.
pub const FRAME_WIDTH_STEP: f32 = 10.0;

// ==========================================================================
// Spacing Defaults
// ==========================================================================

/// Default gap between cells in pixels.
pub const DEFAULT_GAP: f32 = 10.0;

/// Minimum gap in pixels.
pub const MIN_GAP: f32 = 0.0;

/// Maximum gap in pixels.
pub const MAX_GAP: f32 = 50.0;

/// Default outer margin in pixels.
pub const DEFAULT_MARGIN: f32 = 10.0;

/// Minimum outer margin in pixels.
pub const MIN_MARGIN: f32 = 0.0;

/// Maximum outer margin in pixels.
pub const MAX_MARGIN: f32 = 100.0;

// ==========================================================================
// Grid Defaults
// ==========================================================================

/// Minimum rows or columns in a custom layout.
pub const MIN_GRID_DIMENSION: u32 = 1;

/// Maximum rows or columns in a custom layout.
pub const MAX_GRID_DIMENSION: u32 = 10;

// ==========================================================================
// Export Defaults
// ==========================================================================

/// Default JPEG quality.
pub const DEFAULT_EXPORT_QUALITY: u8 = 90;

/// Minimum JPEG quality.
pub const MIN_EXPORT_QUALITY: u8 = 10;

/// Maximum JPEG quality.
pub const MAX_EXPORT_QUALITY: u8 = 100;

/// File name proposed by the save dialog (extension added per format).
pub const DEFAULT_EXPORT_STEM: &str = "collage";

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Pan offset change, in percent, for a drag spanning one full cell.
pub const DRAG_SENSITIVITY: f32 = 200.0;

/// Zoom change per pixel of vertical wheel movement.
pub const WHEEL_ZOOM_FACTOR: f32 = 0.002;

/// Pixels represented by one line of a line-based wheel delta.
pub const WHEEL_LINE_HEIGHT_PX: f32 = 100.0;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Frame validation
    assert!(MIN_FRAME_WIDTH > 0.0);
    assert!(MAX_FRAME_WIDTH > MIN_FRAME_WIDTH);
    assert!(DEFAULT_FRAME_WIDTH >= MIN_FRAME_WIDTH);
    assert!(DEFAULT_FRAME_WIDTH <= MAX_FRAME_WIDTH);
    assert!(INSTAGRAM_FRAME_WIDTH >= MIN_FRAME_WIDTH);
    assert!(INSTAGRAM_FRAME_WIDTH <= MAX_FRAME_WIDTH);

    // Spacing validation
    assert!(MIN_GAP >= 0.0);
    assert!(DEFAULT_GAP >= MIN_GAP && DEFAULT_GAP <= MAX_GAP);
    assert!(MIN_MARGIN >= 0.0);
    assert!(DEFAULT_MARGIN >= MIN_MARGIN && DEFAULT_MARGIN <= MAX_MARGIN);

    // Grid validation
    assert!(MIN_GRID_DIMENSION >= 1);
    assert!(MAX_GRID_DIMENSION >= MIN_GRID_DIMENSION);

    // Export validation
    assert!(MIN_EXPORT_QUALITY > 0);
    assert!(MAX_EXPORT_QUALITY <= 100);
    assert!(DEFAULT_EXPORT_QUALITY >= MIN_EXPORT_QUALITY);
    assert!(DEFAULT_EXPORT_QUALITY <= MAX_EXPORT_QUALITY);

    // Gesture validation
    assert!(DRAG_SENSITIVITY > 0.0);
    assert!(WHEEL_ZOOM_FACTOR > 0.0);
    assert!(WHEEL_LINE_HEIGHT_PX > 0.0);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_defaults_are_valid() {
        assert_eq!(DEFAULT_FRAME_WIDTH, 800.0);
        assert!(DEFAULT_FRAME_WIDTH >= MIN_FRAME_WIDTH);
        assert!(DEFAULT_FRAME_WIDTH <= MAX_FRAME_WIDTH);
    }

    #[test]
    fn spacing_defaults_are_valid() {
        assert_eq!(DEFAULT_GAP, 10.0);
        assert_eq!(DEFAULT_MARGIN, 10.0);
        assert!(MAX_GAP > MIN_GAP);
        assert!(MAX_MARGIN > MIN_MARGIN);
    }

    #[test]
    fn gesture_defaults_match_tuning() {
        assert_eq!(DRAG_SENSITIVITY, 200.0);
        assert_eq!(WHEEL_ZOOM_FACTOR, 0.002);
    }
}
