// SPDX-License-Identifier: MPL-2.0
//! CPU rasterization of a collage with `tiny-skia`.
//!
//! The same pixmap feeds the on-screen preview and the exporter, so what
//! the user sees is what gets saved.

use super::geometry::{CellRect, CoverDraw};
use super::render::{self, Painter, RenderReport};
use super::Collage;
use crate::error::{Error, Result};
use crate::media::image::DecodedImage;
use iced::Color;
use tiny_skia::{
    FillRule, FilterQuality, Paint, PathBuilder, Pattern, Pixmap, Rect, Shader, SpreadMode,
    Stroke, StrokeDash, Transform,
};

/// Paints into a frame-sized pixmap. Labels are not rasterized.
pub struct RasterPainter {
    pixmap: Pixmap,
}

impl RasterPainter {
    /// Allocates a pixmap of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFrame`] for zero-sized or oversized pixmaps.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::InvalidFrame(format!("cannot allocate a {width}x{height} raster"))
        })?;
        Ok(Self { pixmap })
    }

    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(color.r, color.g, color.b, color.a)
        .unwrap_or(tiny_skia::Color::BLACK)
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn to_rect(rect: CellRect) -> Option<Rect> {
    Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

impl Painter for RasterPainter {
    fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
    }

    fn fill_rect(&mut self, rect: CellRect, color: Color) {
        if let Some(rect) = to_rect(rect) {
            self.pixmap
                .fill_rect(rect, &solid(color), Transform::identity(), None);
        }
    }

    fn stroke_rect(&mut self, rect: CellRect, color: Color, width: f32, dash: Option<[f32; 2]>) {
        let Some(path) = to_rect(rect).map(PathBuilder::from_rect) else {
            return;
        };
        let stroke = Stroke {
            width,
            dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }

    fn draw_image(&mut self, image: &DecodedImage, cell: CellRect, draw: &CoverDraw) {
        let Some(rect) = to_rect(cell) else {
            return;
        };
        let (natural_width, natural_height) = image.natural_size();
        let scale_x = draw.scale_x(natural_width);
        let scale_y = draw.scale_y(natural_height);
        if scale_x <= 0.0 || scale_y <= 0.0 {
            return;
        }

        // Filling the cell with the image as a shader clips it to the cell.
        let shader: Shader = Pattern::new(
            image.pixmap().as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bilinear,
            1.0,
            Transform::from_row(
                scale_x,
                0.0,
                0.0,
                scale_y,
                cell.x + draw.draw_x,
                cell.y + draw.draw_y,
            ),
        );
        let paint = Paint {
            shader,
            anti_alias: false,
            ..Paint::default()
        };
        let path = PathBuilder::from_rect(rect);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Rasterizes `collage` at its frame size.
///
/// # Errors
///
/// Fails only if the pixmap cannot be allocated.
pub fn rasterize(collage: &Collage, hovered: Option<usize>) -> Result<(Pixmap, RenderReport)> {
    let (width, height) = collage.frame().pixel_size();
    let mut painter = RasterPainter::new(width, height)?;
    let report = render::render(collage, hovered, &mut painter);
    Ok((painter.into_pixmap(), report))
}

/// Converts premultiplied pixels back to straight RGBA.
#[must_use]
pub fn to_straight_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let color = px.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::render::palette;
    use crate::collage::{Adjustment, SourceImage};
    use crate::domain::collage::{CollageLayout, FrameSpec, SpacingSpec};

    fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let px = pixmap.pixel(x, y).expect("in bounds").demultiply();
        (px.red(), px.green(), px.blue())
    }

    /// Left half red, right half blue.
    fn split_image() -> DecodedImage {
        let mut pixels = Vec::new();
        for _y in 0..10 {
            for x in 0..20 {
                pixels.extend_from_slice(if x < 10 {
                    &[255, 0, 0, 255]
                } else {
                    &[0, 0, 255, 255]
                });
            }
        }
        DecodedImage::from_rgba(20, 10, pixels).expect("valid image")
    }

    fn single_cell(margin: f32) -> Collage {
        Collage::new(
            CollageLayout::OneByOne,
            FrameSpec::new(100.0, 1.0).expect("valid frame"),
            SpacingSpec::new(0.0, margin),
        )
    }

    #[test]
    fn raster_has_frame_size_and_white_margin() {
        let collage = single_cell(10.0);
        let (pixmap, report) = rasterize(&collage, None).expect("raster");
        assert_eq!((pixmap.width(), pixmap.height()), (100, 100));
        assert_eq!(rgb_at(&pixmap, 2, 2), (255, 255, 255));
        assert_eq!(report.empty, 1);
    }

    #[test]
    fn image_covers_cell_and_stays_inside_it() {
        let mut collage = single_cell(10.0);
        let id = collage.add_image(SourceImage::new("split"));
        collage.apply_decoded(id, Ok(split_image()));

        let (pixmap, _) = rasterize(&collage, None).expect("raster");
        // Cover fit of a 2:1 image in a square cell shows the middle: red then blue.
        assert_eq!(rgb_at(&pixmap, 20, 50), (255, 0, 0));
        assert_eq!(rgb_at(&pixmap, 80, 50), (0, 0, 255));
        // Margin untouched even though the scaled image is wider than the cell.
        assert_eq!(rgb_at(&pixmap, 5, 50), (255, 255, 255));
        assert_eq!(rgb_at(&pixmap, 95, 50), (255, 255, 255));
    }

    #[test]
    fn full_pan_shows_one_edge() {
        let mut collage = single_cell(0.0);
        let id = collage.add_image(SourceImage::new("split"));
        collage.apply_decoded(id, Ok(split_image()));
        collage.set_adjustment(id, Adjustment::new(100.0, 0.0, 1.0));

        let (pixmap, _) = rasterize(&collage, None).expect("raster");
        // Panned fully right: the left (red) half fills the cell.
        assert_eq!(rgb_at(&pixmap, 90, 50), (255, 0, 0));
    }

    #[test]
    fn loading_cell_uses_placeholder_fill() {
        let mut collage = single_cell(0.0);
        collage.add_image(SourceImage::new("pending"));
        let (pixmap, _) = rasterize(&collage, None).expect("raster");

        let expected = palette::LOADING_FILL.into_rgba8();
        assert_eq!(rgb_at(&pixmap, 50, 50), (expected[0], expected[1], expected[2]));
    }

    #[test]
    fn straight_rgba_has_four_bytes_per_pixel() {
        let collage = single_cell(0.0);
        let (pixmap, _) = rasterize(&collage, None).expect("raster");
        assert_eq!(to_straight_rgba(&pixmap).len(), 100 * 100 * 4);
    }
}
