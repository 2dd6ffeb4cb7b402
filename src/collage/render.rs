// SPDX-License-Identifier: MPL-2.0
//! Backend-agnostic render pipeline.
//!
//! [`render`] walks the cells in row-major order and issues drawing
//! primitives to a [`Painter`]. The raster backend produces pixels; the
//! preview overlay only draws labels. Each backend implements the
//! primitives it supports and inherits no-ops for the rest.

use super::geometry::{compute_cover_draw, CellRect, CoverDraw};
use super::Collage;
use crate::media::cache::LoadState;
use crate::media::image::DecodedImage;
use iced::Color;

/// Colors of the composited frame.
pub mod palette {
    use iced::Color;

    pub const BACKGROUND: Color = Color::WHITE;
    /// Border around image cells when there is a gap.
    pub const CELL_BORDER: Color = Color::from_rgb8(0xe5, 0xe7, 0xeb);
    /// Fill of cells whose image is loading or failed.
    pub const LOADING_FILL: Color = Color::from_rgb8(0xf3, 0xf4, 0xf6);
    pub const EMPTY_FILL: Color = Color::from_rgb8(0xf9, 0xfa, 0xfb);
    pub const EMPTY_BORDER: Color = Color::from_rgb8(0xd1, 0xd5, 0xdb);
    pub const LABEL: Color = Color::from_rgb8(0x9c, 0xa3, 0xaf);
    pub const HOVER_FILL: Color = Color::from_rgba8(0x3b, 0x82, 0xf6, 0.15);
    pub const HOVER_OUTLINE: Color = Color::from_rgb8(0x3b, 0x82, 0xf6);
}

pub const BORDER_WIDTH: f32 = 2.0;
pub const HOVER_OUTLINE_WIDTH: f32 = 3.0;
/// Dash pattern (on, off) of the empty-slot border.
pub const EMPTY_DASH: [f32; 2] = [10.0, 10.0];

/// Text shown on a placeholder cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLabel {
    Loading,
    Failed,
    Empty,
}

impl CellLabel {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            CellLabel::Loading => "cell-loading",
            CellLabel::Failed => "cell-failed",
            CellLabel::Empty => "cell-empty",
        }
    }
}

/// Drawing primitives used by [`render`]. Coordinates are frame pixels.
pub trait Painter {
    fn fill_background(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _rect: CellRect, _color: Color) {}

    /// Strokes the outline of `rect`, dashed when `dash` is set.
    fn stroke_rect(&mut self, _rect: CellRect, _color: Color, _width: f32, _dash: Option<[f32; 2]>) {
    }

    /// Draws `image` positioned by `draw` (relative to `cell`), clipped to `cell`.
    fn draw_image(&mut self, _image: &DecodedImage, _cell: CellRect, _draw: &CoverDraw) {}

    /// Writes a centered label in `rect`.
    fn label(&mut self, _rect: CellRect, _label: CellLabel) {}
}

/// What a render pass drew, cell by cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub images: usize,
    pub loading: usize,
    pub failed: usize,
    pub empty: usize,
    /// Cells skipped because the layout leaves them no room.
    pub skipped: usize,
}

/// Renders `collage` through `painter`.
///
/// `hovered` highlights that cell on top of everything else. Pass `None`
/// while a drag is in progress and for exports.
pub fn render<P: Painter + ?Sized>(
    collage: &Collage,
    hovered: Option<usize>,
    painter: &mut P,
) -> RenderReport {
    let geometry = collage.geometry();
    let gap = collage.spacing().gap();
    let mut report = RenderReport::default();

    painter.fill_background(palette::BACKGROUND);

    let (cell_width, cell_height) = match geometry.cell_size() {
        Ok(size) => size,
        Err(err) => {
            tracing::debug!(error = %err, "layout leaves no room for cells, skipping");
            report.skipped = geometry.cells();
            return report;
        }
    };

    for index in 0..geometry.cells() {
        let Ok(rect) = geometry.cell_rect(index) else {
            report.skipped += 1;
            continue;
        };

        let Some(source) = collage.images().get(index) else {
            painter.fill_rect(rect, palette::EMPTY_FILL);
            if gap > 0.0 {
                painter.stroke_rect(rect, palette::EMPTY_BORDER, BORDER_WIDTH, Some(EMPTY_DASH));
            }
            painter.label(rect, CellLabel::Empty);
            report.empty += 1;
            continue;
        };

        match collage.load_state(source.id()) {
            Some(LoadState::Loaded(image)) => {
                let (natural_width, natural_height) = image.natural_size();
                let draw = compute_cover_draw(
                    natural_width,
                    natural_height,
                    cell_width,
                    cell_height,
                    collage.adjustment(source.id()),
                );
                painter.draw_image(image, rect, &draw);
                if gap > 0.0 {
                    painter.stroke_rect(rect, palette::CELL_BORDER, BORDER_WIDTH, None);
                }
                report.images += 1;
            }
            Some(LoadState::Failed(_)) => {
                painter.fill_rect(rect, palette::LOADING_FILL);
                painter.label(rect, CellLabel::Failed);
                report.failed += 1;
            }
            Some(LoadState::Pending) | None => {
                painter.fill_rect(rect, palette::LOADING_FILL);
                painter.label(rect, CellLabel::Loading);
                report.loading += 1;
            }
        }
    }

    if let Some(index) = hovered.filter(|&index| index < collage.occupied_cells()) {
        if let Ok(rect) = geometry.cell_rect(index) {
            painter.fill_rect(rect, palette::HOVER_FILL);
            painter.stroke_rect(rect, palette::HOVER_OUTLINE, HOVER_OUTLINE_WIDTH, None);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::{Adjustment, SourceImage};
    use crate::domain::collage::{CollageLayout, FrameSpec, SpacingSpec};
    use crate::error::Error;

    #[derive(Debug, PartialEq)]
    enum Op {
        Background,
        Fill(usize, Color),
        Stroke(usize, Color, bool),
        Image(usize),
        Label(usize, CellLabel),
    }

    /// Records primitives, identifying cells by their top-left corner.
    struct Recorder {
        corners: Vec<(f32, f32)>,
        ops: Vec<Op>,
    }

    impl Recorder {
        fn for_collage(collage: &Collage) -> Self {
            let geometry = collage.geometry();
            let corners = (0..geometry.cells())
                .filter_map(|i| geometry.cell_rect(i).ok())
                .map(|rect| (rect.x, rect.y))
                .collect();
            Self {
                corners,
                ops: Vec::new(),
            }
        }

        fn cell(&self, rect: CellRect) -> usize {
            self.corners
                .iter()
                .position(|&corner| corner == (rect.x, rect.y))
                .expect("primitive targets a known cell")
        }
    }

    impl Painter for Recorder {
        fn fill_background(&mut self, _color: Color) {
            self.ops.push(Op::Background);
        }

        fn fill_rect(&mut self, rect: CellRect, color: Color) {
            let cell = self.cell(rect);
            self.ops.push(Op::Fill(cell, color));
        }

        fn stroke_rect(&mut self, rect: CellRect, color: Color, _width: f32, dash: Option<[f32; 2]>) {
            let cell = self.cell(rect);
            self.ops.push(Op::Stroke(cell, color, dash.is_some()));
        }

        fn draw_image(&mut self, _image: &DecodedImage, cell: CellRect, _draw: &CoverDraw) {
            let cell = self.cell(cell);
            self.ops.push(Op::Image(cell));
        }

        fn label(&mut self, rect: CellRect, label: CellLabel) {
            let cell = self.cell(rect);
            self.ops.push(Op::Label(cell, label));
        }
    }

    fn pixel() -> DecodedImage {
        DecodedImage::from_rgba(2, 1, vec![255; 8]).expect("valid image")
    }

    fn collage(layout: CollageLayout, gap: f32) -> Collage {
        Collage::new(
            layout,
            FrameSpec::new(800.0, 1.0).expect("valid frame"),
            SpacingSpec::new(gap, 20.0),
        )
    }

    #[test]
    fn three_images_in_four_cells_leave_one_empty_slot() {
        let mut collage = collage(CollageLayout::TwoByTwo, 10.0);
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|name| collage.add_image(SourceImage::new(name)))
            .collect();
        collage.apply_decoded(ids[0], Ok(pixel()));
        collage.apply_decoded(ids[2], Err(Error::Decode("bad".into())));

        let mut recorder = Recorder::for_collage(&collage);
        let report = render(&collage, None, &mut recorder);

        assert_eq!(
            report,
            RenderReport {
                images: 1,
                loading: 1,
                failed: 1,
                empty: 1,
                skipped: 0,
            }
        );
        assert_eq!(
            recorder.ops,
            vec![
                Op::Background,
                Op::Image(0),
                Op::Stroke(0, palette::CELL_BORDER, false),
                Op::Fill(1, palette::LOADING_FILL),
                Op::Label(1, CellLabel::Loading),
                Op::Fill(2, palette::LOADING_FILL),
                Op::Label(2, CellLabel::Failed),
                Op::Fill(3, palette::EMPTY_FILL),
                Op::Stroke(3, palette::EMPTY_BORDER, true),
                Op::Label(3, CellLabel::Empty),
            ]
        );
    }

    #[test]
    fn no_borders_without_gap() {
        let mut collage = collage(CollageLayout::OneByTwo, 0.0);
        let id = collage.add_image(SourceImage::new("a"));
        collage.apply_decoded(id, Ok(pixel()));

        let mut recorder = Recorder::for_collage(&collage);
        render(&collage, None, &mut recorder);

        assert!(!recorder
            .ops
            .iter()
            .any(|op| matches!(op, Op::Stroke(..))));
    }

    #[test]
    fn hover_highlight_is_drawn_last() {
        let mut collage = collage(CollageLayout::OneByTwo, 10.0);
        let id = collage.add_image(SourceImage::new("a"));
        collage.apply_decoded(id, Ok(pixel()));
        collage.set_adjustment(id, Adjustment::new(30.0, 0.0, 2.0));

        let mut recorder = Recorder::for_collage(&collage);
        render(&collage, Some(0), &mut recorder);

        let tail = &recorder.ops[recorder.ops.len() - 2..];
        assert_eq!(
            tail,
            [
                Op::Fill(0, palette::HOVER_FILL),
                Op::Stroke(0, palette::HOVER_OUTLINE, false),
            ]
        );
    }

    #[test]
    fn hover_on_empty_cell_is_ignored() {
        let collage = collage(CollageLayout::OneByTwo, 10.0);
        let mut recorder = Recorder::for_collage(&collage);
        render(&collage, Some(1), &mut recorder);
        assert!(!recorder
            .ops
            .iter()
            .any(|op| matches!(op, Op::Fill(_, color) if *color == palette::HOVER_FILL)));
    }

    #[test]
    fn images_beyond_grid_are_not_drawn() {
        let mut collage = collage(CollageLayout::OneByOne, 10.0);
        for name in ["a", "b", "c"] {
            let id = collage.add_image(SourceImage::new(name));
            collage.apply_decoded(id, Ok(pixel()));
        }

        let mut recorder = Recorder::for_collage(&collage);
        let report = render(&collage, None, &mut recorder);
        assert_eq!(report.images, 1);
        assert_eq!(collage.overflow(), 2);
    }

    #[test]
    fn invalid_layout_only_clears_background() {
        let mut collage = Collage::new(
            CollageLayout::ThreeByFour,
            FrameSpec::new(400.0, 1.0).expect("valid frame"),
            SpacingSpec::new(50.0, 200.0),
        );
        assert!(collage.geometry().cell_size().is_err());
        collage.add_image(SourceImage::new("a"));

        let mut recorder = Recorder {
            corners: Vec::new(),
            ops: Vec::new(),
        };
        let report = render(&collage, Some(0), &mut recorder);
        assert_eq!(recorder.ops, vec![Op::Background]);
        assert_eq!(report.skipped, 12);
    }
}
