// SPDX-License-Identifier: MPL-2.0
//! Cell layout and cover-fit math.
//!
//! Every coordinate here is in frame pixels, the unit of [`FrameSpec`]. The
//! functions are pure: the same specs always produce the same rectangles.

use super::adjustment::Adjustment;
use crate::domain::collage::{FrameSpec, GridSpec, SpacingSpec};
use crate::error::{Error, Result};

/// Axis-aligned rectangle in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Width and height shared by every cell of the grid.
///
/// # Errors
///
/// Returns [`Error::InvalidLayout`] when gap and margin leave no room for a
/// cell on either axis.
pub fn cell_size(grid: GridSpec, frame: FrameSpec, spacing: SpacingSpec) -> Result<(f32, f32)> {
    let available_width = frame.width() - 2.0 * spacing.margin();
    let available_height = frame.height() - 2.0 * spacing.margin();

    let cols = grid.cols() as f32;
    let rows = grid.rows() as f32;
    let cell_width = (available_width - (cols - 1.0) * spacing.gap()) / cols;
    let cell_height = (available_height - (rows - 1.0) * spacing.gap()) / rows;

    if cell_width <= 0.0 || cell_height <= 0.0 || !cell_width.is_finite() || !cell_height.is_finite()
    {
        return Err(Error::InvalidLayout {
            cell_width,
            cell_height,
        });
    }
    Ok((cell_width, cell_height))
}

/// Rectangle of cell `index`, counted in row-major order.
///
/// Indices past the last cell are not rejected; they continue the row-major
/// pattern below the grid.
///
/// # Errors
///
/// Same conditions as [`cell_size`].
pub fn compute_cell_rect(
    index: usize,
    grid: GridSpec,
    frame: FrameSpec,
    spacing: SpacingSpec,
) -> Result<CellRect> {
    let (cell_width, cell_height) = cell_size(grid, frame, spacing)?;
    let cols = grid.cols() as usize;
    let row = (index / cols) as f32;
    let col = (index % cols) as f32;

    Ok(CellRect {
        x: spacing.margin() + col * (cell_width + spacing.gap()),
        y: spacing.margin() + row * (cell_height + spacing.gap()),
        width: cell_width,
        height: cell_height,
    })
}

/// Where to draw a source image, relative to its cell origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverDraw {
    pub draw_x: f32,
    pub draw_y: f32,
    pub draw_width: f32,
    pub draw_height: f32,
    /// Zoom at which the image exactly covers the cell.
    pub min_zoom: f32,
    /// Zoom actually applied, never below `min_zoom`.
    pub effective_zoom: f32,
    /// Largest horizontal pan, in pixels, that keeps the cell covered.
    pub max_offset_x: f32,
    /// Largest vertical pan, in pixels, that keeps the cell covered.
    pub max_offset_y: f32,
}

impl CoverDraw {
    /// Draw that fills the cell exactly, used for degenerate inputs.
    fn fill(cell_width: f32, cell_height: f32) -> Self {
        Self {
            draw_x: 0.0,
            draw_y: 0.0,
            draw_width: cell_width.max(0.0),
            draw_height: cell_height.max(0.0),
            min_zoom: 1.0,
            effective_zoom: 1.0,
            max_offset_x: 0.0,
            max_offset_y: 0.0,
        }
    }

    /// Horizontal scale from source pixels to frame pixels.
    #[must_use]
    pub fn scale_x(&self, natural_width: f32) -> f32 {
        if natural_width > 0.0 {
            self.draw_width / natural_width
        } else {
            0.0
        }
    }

    /// Vertical scale from source pixels to frame pixels.
    #[must_use]
    pub fn scale_y(&self, natural_height: f32) -> f32 {
        if natural_height > 0.0 {
            self.draw_height / natural_height
        } else {
            0.0
        }
    }
}

/// Scales an image to cover a cell, then applies zoom and pan.
///
/// Zoom below the cover scale is floored to it and the pan is limited to
/// the overscan, so the result always covers the whole cell.
#[must_use]
pub fn compute_cover_draw(
    natural_width: f32,
    natural_height: f32,
    cell_width: f32,
    cell_height: f32,
    adjustment: Adjustment,
) -> CoverDraw {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !(valid(natural_width) && valid(natural_height) && valid(cell_width) && valid(cell_height))
    {
        return CoverDraw::fill(cell_width, cell_height);
    }

    let image_aspect = natural_width / natural_height;
    let cell_aspect = cell_width / cell_height;

    let (base_width, base_height) = if image_aspect > cell_aspect {
        (cell_height * image_aspect, cell_height)
    } else {
        (cell_width, cell_width / image_aspect)
    };

    let min_zoom = (cell_width / base_width).max(cell_height / base_height);
    let effective_zoom = adjustment.zoom.value().max(min_zoom);

    let scaled_width = base_width * effective_zoom;
    let scaled_height = base_height * effective_zoom;

    let max_offset_x = ((scaled_width - cell_width) / 2.0).max(0.0);
    let max_offset_y = ((scaled_height - cell_height) / 2.0).max(0.0);

    let pixel_offset_x =
        (adjustment.offset_x.as_fraction() * max_offset_x).clamp(-max_offset_x, max_offset_x);
    let pixel_offset_y =
        (adjustment.offset_y.as_fraction() * max_offset_y).clamp(-max_offset_y, max_offset_y);

    CoverDraw {
        draw_x: (cell_width - scaled_width) / 2.0 + pixel_offset_x,
        draw_y: (cell_height - scaled_height) / 2.0 + pixel_offset_y,
        draw_width: scaled_width,
        draw_height: scaled_height,
        min_zoom,
        effective_zoom,
        max_offset_x,
        max_offset_y,
    }
}

/// Grid, frame and spacing bundled for repeated cell queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub grid: GridSpec,
    pub frame: FrameSpec,
    pub spacing: SpacingSpec,
}

impl GridGeometry {
    #[must_use]
    pub fn new(grid: GridSpec, frame: FrameSpec, spacing: SpacingSpec) -> Self {
        Self {
            grid,
            frame,
            spacing,
        }
    }

    #[must_use]
    pub fn cells(&self) -> usize {
        self.grid.cells()
    }

    pub fn cell_size(&self) -> Result<(f32, f32)> {
        cell_size(self.grid, self.frame, self.spacing)
    }

    pub fn cell_rect(&self, index: usize) -> Result<CellRect> {
        compute_cell_rect(index, self.grid, self.frame, self.spacing)
    }

    /// Index of the occupied cell under a frame-space point.
    ///
    /// Only the first `occupied` cells are considered. Points in gaps or
    /// margins, and every point of an invalid layout, miss.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32, occupied: usize) -> Option<usize> {
        let limit = occupied.min(self.cells());
        (0..limit).find(|&index| {
            self.cell_rect(index)
                .map(|rect| rect.contains(x, y))
                .unwrap_or(false)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn square_2x2() -> GridGeometry {
        GridGeometry::new(
            GridSpec::new(2, 2),
            FrameSpec::new(800.0, 1.0).expect("valid frame"),
            SpacingSpec::new(10.0, 20.0),
        )
    }

    #[test]
    fn two_by_two_cells_are_placed_row_major() {
        let geometry = square_2x2();
        let expected = [(20.0, 20.0), (405.0, 20.0), (20.0, 405.0), (405.0, 405.0)];

        for (index, (x, y)) in expected.into_iter().enumerate() {
            let rect = geometry.cell_rect(index).expect("valid layout");
            assert_abs_diff_eq!(rect.x, x);
            assert_abs_diff_eq!(rect.y, y);
            assert_abs_diff_eq!(rect.width, 375.0);
            assert_abs_diff_eq!(rect.height, 375.0);
        }
    }

    #[test]
    fn oversized_spacing_is_an_invalid_layout() {
        let frame = FrameSpec::new(400.0, 1.0).expect("valid frame");
        // Margins alone consume the whole frame.
        let result = compute_cell_rect(0, GridSpec::new(3, 3), frame, SpacingSpec::new(50.0, 200.0));
        assert!(matches!(result, Err(Error::InvalidLayout { .. })));

        // Gaps alone consume the whole width.
        let result = compute_cell_rect(0, GridSpec::new(1, 3), frame, SpacingSpec::new(200.0, 0.0));
        assert!(matches!(result, Err(Error::InvalidLayout { .. })));
    }

    #[test]
    fn cover_draw_fills_cell_without_adjustment() {
        // Landscape image into a square cell: height matches, width overflows.
        let draw = compute_cover_draw(400.0, 200.0, 100.0, 100.0, Adjustment::default());
        assert_abs_diff_eq!(draw.draw_height, 100.0);
        assert_abs_diff_eq!(draw.draw_width, 200.0);
        assert_abs_diff_eq!(draw.draw_x, -50.0);
        assert_abs_diff_eq!(draw.draw_y, 0.0);
        assert_abs_diff_eq!(draw.min_zoom, 1.0);
        assert_abs_diff_eq!(draw.max_offset_x, 50.0);
        assert_abs_diff_eq!(draw.max_offset_y, 0.0);
    }

    #[test]
    fn cover_draw_pans_to_the_edge_at_full_offset() {
        let adjustment = Adjustment::new(100.0, -100.0, 2.0);
        let draw = compute_cover_draw(100.0, 100.0, 100.0, 100.0, adjustment);
        // Scaled to 200x200, overscan 50 on each axis.
        assert_abs_diff_eq!(draw.draw_x, 0.0);
        assert_abs_diff_eq!(draw.draw_y, -100.0);
        assert_abs_diff_eq!(draw.draw_x + draw.draw_width, 200.0);
        assert_abs_diff_eq!(draw.draw_y + draw.draw_height, 100.0);
    }

    #[test]
    fn zoom_below_cover_is_floored() {
        let draw = compute_cover_draw(300.0, 300.0, 150.0, 100.0, Adjustment::new(0.0, 0.0, 0.5));
        assert_abs_diff_eq!(draw.effective_zoom, 1.0);
        assert!(draw.draw_width >= 150.0);
        assert!(draw.draw_height >= 100.0);
    }

    #[test]
    fn offset_without_overscan_has_no_effect() {
        // Same aspect as the cell at zoom 1: nothing to pan.
        let draw = compute_cover_draw(200.0, 100.0, 100.0, 50.0, Adjustment::new(100.0, 100.0, 1.0));
        assert_abs_diff_eq!(draw.draw_x, 0.0);
        assert_abs_diff_eq!(draw.draw_y, 0.0);
    }

    #[test]
    fn degenerate_image_falls_back_to_cell() {
        let draw = compute_cover_draw(0.0, 100.0, 80.0, 60.0, Adjustment::default());
        assert_eq!(draw.draw_width, 80.0);
        assert_eq!(draw.draw_height, 60.0);
        assert_eq!(draw.draw_x, 0.0);
    }

    #[test]
    fn hit_test_only_considers_occupied_cells() {
        let geometry = square_2x2();
        assert_eq!(geometry.hit_test(500.0, 500.0, 4), Some(3));
        assert_eq!(geometry.hit_test(500.0, 500.0, 3), None);
        assert_eq!(geometry.hit_test(30.0, 30.0, 1), Some(0));
    }

    #[test]
    fn hit_test_misses_gaps_and_margins() {
        let geometry = square_2x2();
        assert_eq!(geometry.hit_test(400.0, 100.0, 4), None);
        assert_eq!(geometry.hit_test(5.0, 5.0, 4), None);
    }
}
