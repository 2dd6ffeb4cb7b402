// SPDX-License-Identifier: MPL-2.0
//! The collage document and its compositing engine.
//!
//! [`Collage`] owns everything a render needs: the ordered images, their
//! adjustments and decoded bitmaps, and the grid/frame/spacing settings.
//! Geometry and rendering are in the submodules.

pub mod adjustment;
pub mod geometry;
pub mod raster;
pub mod render;
pub mod source;

pub use adjustment::{Adjustment, AdjustmentStore};
pub use geometry::{compute_cell_rect, compute_cover_draw, CellRect, CoverDraw, GridGeometry};
pub use render::{render, CellLabel, Painter, RenderReport};
pub use source::{ImageId, ImageList, SourceImage};

use crate::domain::collage::{CollageLayout, FrameSpec, SpacingSpec};
use crate::error::Result;
use crate::media::cache::{BitmapCache, LoadState};
use crate::media::image::DecodedImage;

#[derive(Debug, Clone, Default)]
pub struct Collage {
    images: ImageList,
    adjustments: AdjustmentStore,
    bitmaps: BitmapCache,
    layout: CollageLayout,
    frame: FrameSpec,
    spacing: SpacingSpec,
}

impl Collage {
    #[must_use]
    pub fn new(layout: CollageLayout, frame: FrameSpec, spacing: SpacingSpec) -> Self {
        Self {
            layout,
            frame,
            spacing,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Images
    // -------------------------------------------------------------------------

    /// Appends an image and marks its bitmap as pending.
    pub fn add_image(&mut self, image: SourceImage) -> ImageId {
        let id = image.id();
        self.bitmaps.mark_pending(id);
        tracing::debug!(%id, name = image.display_name(), "image added");
        self.images.push(image);
        id
    }

    /// Removes an image together with its bitmap and adjustment.
    pub fn remove_image(&mut self, id: ImageId) -> Option<SourceImage> {
        let removed = self.images.remove(id)?;
        self.bitmaps.evict(id);
        self.adjustments.reset(id);
        tracing::debug!(%id, name = removed.display_name(), "image removed, bitmap evicted");
        Some(removed)
    }

    /// Moves the image at `from` to index `to`, changing the cell it fills.
    pub fn move_image(&mut self, from: usize, to: usize) -> bool {
        self.images.move_item(from, to)
    }

    /// Removes every image.
    pub fn clear(&mut self) {
        for image in self.images.clear() {
            self.bitmaps.evict(image.id());
        }
        self.adjustments.reset_all();
    }

    /// Records the outcome of a decode.
    ///
    /// Results for images that were removed in the meantime are dropped.
    /// Returns whether the result was applied.
    pub fn apply_decoded(&mut self, id: ImageId, result: Result<DecodedImage>) -> bool {
        if !self.images.contains(id) {
            tracing::debug!(%id, "dropping decode result for removed image");
            return false;
        }
        match result {
            Ok(image) => {
                tracing::info!(%id, width = image.width, height = image.height, "image loaded");
                self.bitmaps.insert(id, image);
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "image failed to load");
                self.bitmaps.mark_failed(id, err.to_string());
            }
        }
        true
    }

    #[must_use]
    pub fn images(&self) -> &ImageList {
        &self.images
    }

    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn load_state(&self, id: ImageId) -> Option<&LoadState> {
        self.bitmaps.state(id)
    }

    #[must_use]
    pub fn bitmap(&self, id: ImageId) -> Option<&DecodedImage> {
        self.bitmaps.get(id)
    }

    /// Id of the image filling cell `index`, if the cell is occupied.
    #[must_use]
    pub fn image_at_cell(&self, index: usize) -> Option<ImageId> {
        if index >= self.geometry().cells() {
            return None;
        }
        self.images.get(index).map(SourceImage::id)
    }

    /// Number of cells holding an image.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.images.len().min(self.geometry().cells())
    }

    /// Number of images that do not fit in the grid.
    #[must_use]
    pub fn overflow(&self) -> usize {
        self.images.len().saturating_sub(self.geometry().cells())
    }

    // -------------------------------------------------------------------------
    // Adjustments
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn adjustments(&self) -> &AdjustmentStore {
        &self.adjustments
    }

    #[must_use]
    pub fn adjustment(&self, id: ImageId) -> Adjustment {
        self.adjustments.get(id)
    }

    pub fn set_adjustment(&mut self, id: ImageId, adjustment: Adjustment) {
        self.adjustments.set(id, adjustment);
    }

    pub fn update_adjustment(
        &mut self,
        id: ImageId,
        f: impl FnOnce(Adjustment) -> Adjustment,
    ) -> Adjustment {
        self.adjustments.update(id, f)
    }

    pub fn reset_adjustment(&mut self, id: ImageId) {
        self.adjustments.reset(id);
    }

    pub fn reset_all_adjustments(&mut self) {
        self.adjustments.reset_all();
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn layout(&self) -> CollageLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: CollageLayout) {
        self.layout = layout;
    }

    #[must_use]
    pub fn frame(&self) -> FrameSpec {
        self.frame
    }

    pub fn set_frame(&mut self, frame: FrameSpec) {
        self.frame = frame;
    }

    #[must_use]
    pub fn spacing(&self) -> SpacingSpec {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: SpacingSpec) {
        self.spacing = spacing;
    }

    /// Current grid, frame and spacing.
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.layout.grid(), self.frame, self.spacing)
    }

    /// Rectangle of the cell holding `id`, if the image is on the grid.
    #[must_use]
    pub fn cell_rect_of(&self, id: ImageId) -> Option<CellRect> {
        let index = self.images.position(id)?;
        if index >= self.geometry().cells() {
            return None;
        }
        self.geometry().cell_rect(index).ok()
    }
}
