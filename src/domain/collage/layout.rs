// SPDX-License-Identifier: MPL-2.0
//! Grid, frame and spacing specifications.
//!
//! These three values fully determine the geometry of every cell. Named
//! layouts and aspect ratio presets resolve to them.

use crate::config::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// GridSpec
// =============================================================================

/// Number of rows and columns in the collage grid (both at least 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    /// Creates a grid, clamping both dimensions to the supported range.
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: rows.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            cols: cols.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
        }
    }

    #[must_use]
    pub fn rows(self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(self) -> u32 {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn cells(self) -> usize {
        (self.rows * self.cols) as usize
    }
}

// =============================================================================
// FrameSpec
// =============================================================================

/// Output frame size, expressed as a width and an aspect ratio (width / height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    width: f32,
    aspect_ratio: f32,
}

impl FrameSpec {
    /// Creates a frame specification.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] when either value is non-finite or not
    /// strictly positive.
    pub fn new(width: f32, aspect_ratio: f32) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(Error::InvalidFrame(format!("width must be positive, got {width}")));
        }
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(Error::InvalidFrame(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }
        Ok(Self {
            width,
            aspect_ratio,
        })
    }

    #[must_use]
    pub fn width(self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn aspect_ratio(self) -> f32 {
        self.aspect_ratio
    }

    #[must_use]
    pub fn height(self) -> f32 {
        self.width / self.aspect_ratio
    }

    /// Size of the rendered raster in whole pixels.
    #[must_use]
    pub fn pixel_size(self) -> (u32, u32) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = (self.width.round() as u32, self.height().round() as u32);
        (size.0.max(1), size.1.max(1))
    }
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: crate::config::DEFAULT_FRAME_WIDTH,
            aspect_ratio: AspectRatio::default().value(),
        }
    }
}

// =============================================================================
// SpacingSpec
// =============================================================================

/// Gap between adjacent cells and margin around the grid, in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpacingSpec {
    gap: f32,
    margin: f32,
}

impl SpacingSpec {
    /// Creates a spacing specification. Negative or non-finite values become 0.
    #[must_use]
    pub fn new(gap: f32, margin: f32) -> Self {
        Self {
            gap: non_negative(gap),
            margin: non_negative(margin),
        }
    }

    #[must_use]
    pub fn gap(self) -> f32 {
        self.gap
    }

    #[must_use]
    pub fn margin(self) -> f32 {
        self.margin
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// =============================================================================
// CollageLayout
// =============================================================================

/// Named grid layouts offered by the layout picker, plus a custom grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollageLayout {
    OneByOne,
    OneByTwo,
    #[default]
    TwoByOne,
    TwoByTwo,
    ThreeByOne,
    OneByThree,
    ThreeByFour,
    Custom { rows: u32, cols: u32 },
}

impl CollageLayout {
    /// Every named preset, in picker order.
    pub const ALL_PRESETS: [CollageLayout; 7] = [
        CollageLayout::OneByOne,
        CollageLayout::OneByTwo,
        CollageLayout::TwoByOne,
        CollageLayout::TwoByTwo,
        CollageLayout::ThreeByOne,
        CollageLayout::OneByThree,
        CollageLayout::ThreeByFour,
    ];

    /// Creates a custom layout with clamped dimensions.
    #[must_use]
    pub fn custom(rows: u32, cols: u32) -> Self {
        let grid = GridSpec::new(rows, cols);
        CollageLayout::Custom {
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }

    /// Grid shape for this layout.
    #[must_use]
    pub fn grid(self) -> GridSpec {
        match self {
            CollageLayout::OneByOne => GridSpec::new(1, 1),
            CollageLayout::OneByTwo => GridSpec::new(1, 2),
            CollageLayout::TwoByOne => GridSpec::new(2, 1),
            CollageLayout::TwoByTwo => GridSpec::new(2, 2),
            CollageLayout::ThreeByOne => GridSpec::new(3, 1),
            CollageLayout::OneByThree => GridSpec::new(1, 3),
            CollageLayout::ThreeByFour => GridSpec::new(3, 4),
            CollageLayout::Custom { rows, cols } => GridSpec::new(rows, cols),
        }
    }

    /// Short identifier (`"2x1"`, or `"custom"` for a custom grid).
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            CollageLayout::OneByOne => "1x1",
            CollageLayout::OneByTwo => "1x2",
            CollageLayout::TwoByOne => "2x1",
            CollageLayout::TwoByTwo => "2x2",
            CollageLayout::ThreeByOne => "3x1",
            CollageLayout::OneByThree => "1x3",
            CollageLayout::ThreeByFour => "3x4",
            CollageLayout::Custom { .. } => "custom",
        }
    }

    /// Fluent key describing this layout in the picker.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            CollageLayout::OneByOne => "layout-1x1",
            CollageLayout::OneByTwo => "layout-1x2",
            CollageLayout::TwoByOne => "layout-2x1",
            CollageLayout::TwoByTwo => "layout-2x2",
            CollageLayout::ThreeByOne => "layout-3x1",
            CollageLayout::OneByThree => "layout-1x3",
            CollageLayout::ThreeByFour => "layout-3x4",
            CollageLayout::Custom { .. } => "layout-custom",
        }
    }

    #[must_use]
    pub fn is_custom(self) -> bool {
        matches!(self, CollageLayout::Custom { .. })
    }
}

impl fmt::Display for CollageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        write!(f, "{}x{}", grid.rows(), grid.cols())
    }
}

impl From<CollageLayout> for String {
    fn from(layout: CollageLayout) -> Self {
        layout.to_string()
    }
}

impl TryFrom<String> for CollageLayout {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let trimmed = value.trim();
        if let Some(preset) = CollageLayout::ALL_PRESETS
            .into_iter()
            .find(|preset| preset.id() == trimmed)
        {
            return Ok(preset);
        }

        let (rows, cols) = trimmed
            .split_once('x')
            .ok_or_else(|| format!("invalid layout '{value}', expected ROWSxCOLS"))?;
        let rows: u32 = rows
            .parse()
            .map_err(|_| format!("invalid row count in layout '{value}'"))?;
        let cols: u32 = cols
            .parse()
            .map_err(|_| format!("invalid column count in layout '{value}'"))?;
        Ok(CollageLayout::custom(rows, cols))
    }
}

// =============================================================================
// AspectRatio
// =============================================================================

/// Aspect ratio presets for the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "2:3")]
    TwoByThree,
    #[serde(rename = "3:2")]
    ThreeByTwo,
    #[default]
    #[serde(rename = "3:4")]
    ThreeByFour,
    #[serde(rename = "4:3")]
    FourByThree,
    #[serde(rename = "4:5")]
    FourByFive,
    #[serde(rename = "5:4")]
    FiveByFour,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    Vertical,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 9] = [
        AspectRatio::Square,
        AspectRatio::TwoByThree,
        AspectRatio::ThreeByTwo,
        AspectRatio::ThreeByFour,
        AspectRatio::FourByThree,
        AspectRatio::FourByFive,
        AspectRatio::FiveByFour,
        AspectRatio::Widescreen,
        AspectRatio::Vertical,
    ];

    /// Width divided by height.
    #[must_use]
    pub fn value(self) -> f32 {
        match self {
            AspectRatio::Square => 1.0,
            AspectRatio::TwoByThree => 2.0 / 3.0,
            AspectRatio::ThreeByTwo => 3.0 / 2.0,
            AspectRatio::ThreeByFour => 3.0 / 4.0,
            AspectRatio::FourByThree => 4.0 / 3.0,
            AspectRatio::FourByFive => 4.0 / 5.0,
            AspectRatio::FiveByFour => 5.0 / 4.0,
            AspectRatio::Widescreen => 16.0 / 9.0,
            AspectRatio::Vertical => 9.0 / 16.0,
        }
    }

    /// Ratio notation, e.g. `"16:9"`.
    #[must_use]
    pub fn notation(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::TwoByThree => "2:3",
            AspectRatio::ThreeByTwo => "3:2",
            AspectRatio::ThreeByFour => "3:4",
            AspectRatio::FourByThree => "4:3",
            AspectRatio::FourByFive => "4:5",
            AspectRatio::FiveByFour => "5:4",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Vertical => "9:16",
        }
    }

    /// Fluent key for the orientation hint shown next to the notation.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            AspectRatio::Square => "aspect-square",
            AspectRatio::TwoByThree | AspectRatio::ThreeByFour | AspectRatio::FourByFive => {
                "aspect-portrait"
            }
            AspectRatio::ThreeByTwo | AspectRatio::FourByThree | AspectRatio::FiveByFour => {
                "aspect-landscape"
            }
            AspectRatio::Widescreen => "aspect-widescreen",
            AspectRatio::Vertical => "aspect-mobile",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn grid_clamps_to_supported_range() {
        let grid = GridSpec::new(0, 99);
        assert_eq!(grid.rows(), MIN_GRID_DIMENSION);
        assert_eq!(grid.cols(), MAX_GRID_DIMENSION);
    }

    #[test]
    fn preset_cell_counts_match_names() {
        let expected = [1, 2, 2, 4, 3, 3, 12];
        for (layout, cells) in CollageLayout::ALL_PRESETS.iter().zip(expected) {
            assert_eq!(layout.grid().cells(), cells, "layout {}", layout.id());
        }
    }

    #[test]
    fn layout_string_round_trip() {
        for layout in CollageLayout::ALL_PRESETS {
            let parsed = CollageLayout::try_from(String::from(layout)).expect("preset parses");
            assert_eq!(parsed, layout);
        }

        let custom = CollageLayout::custom(4, 5);
        let parsed = CollageLayout::try_from(String::from(custom)).expect("custom parses");
        assert_eq!(parsed, custom);
    }

    #[test]
    fn layout_parse_rejects_garbage() {
        assert!(CollageLayout::try_from("three by four".to_string()).is_err());
        assert!(CollageLayout::try_from("ax2".to_string()).is_err());
    }

    #[test]
    fn frame_height_follows_aspect_ratio() {
        let frame = FrameSpec::new(800.0, 0.75).expect("valid frame");
        assert_abs_diff_eq!(frame.height(), 1066.6667, epsilon = 1e-3);
        assert_eq!(frame.pixel_size(), (800, 1067));
    }

    #[test]
    fn frame_rejects_non_positive_values() {
        assert!(matches!(FrameSpec::new(0.0, 1.0), Err(Error::InvalidFrame(_))));
        assert!(matches!(FrameSpec::new(800.0, -1.0), Err(Error::InvalidFrame(_))));
        assert!(matches!(FrameSpec::new(f32::NAN, 1.0), Err(Error::InvalidFrame(_))));
    }

    #[test]
    fn spacing_clamps_negative_values() {
        let spacing = SpacingSpec::new(-5.0, f32::NAN);
        assert_eq!(spacing.gap(), 0.0);
        assert_eq!(spacing.margin(), 0.0);
    }

    #[test]
    fn aspect_ratio_values() {
        assert_abs_diff_eq!(AspectRatio::Widescreen.value(), 16.0 / 9.0);
        assert_eq!(AspectRatio::default(), AspectRatio::ThreeByFour);
        assert_eq!(AspectRatio::Vertical.to_string(), "9:16");
    }
}
