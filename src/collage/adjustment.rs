// SPDX-License-Identifier: MPL-2.0
//! Per-image pan and zoom state.
//!
//! The store is the only place adjustments live. Images without an entry
//! read as [`Adjustment::default`], so callers never branch on absence.

use super::source::ImageId;
use crate::domain::collage::{OffsetPercent, ZoomFactor};
use std::collections::HashMap;

/// Pan and zoom applied on top of the cover fit of one image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustment {
    pub offset_x: OffsetPercent,
    pub offset_y: OffsetPercent,
    pub zoom: ZoomFactor,
}

impl Adjustment {
    /// Builds an adjustment from raw values, clamping each to its range.
    #[must_use]
    pub fn new(offset_x: f32, offset_y: f32, zoom: f32) -> Self {
        Self {
            offset_x: OffsetPercent::new(offset_x),
            offset_y: OffsetPercent::new(offset_y),
            zoom: ZoomFactor::new(zoom),
        }
    }

    /// Returns a copy panned by the given percentage deltas.
    #[must_use]
    pub fn panned(self, delta_x: f32, delta_y: f32) -> Self {
        Self {
            offset_x: self.offset_x.shifted(delta_x),
            offset_y: self.offset_y.shifted(delta_y),
            ..self
        }
    }

    /// Returns a copy with the zoom replaced.
    #[must_use]
    pub fn with_zoom(self, zoom: ZoomFactor) -> Self {
        Self { zoom, ..self }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Adjustments keyed by image id.
#[derive(Debug, Clone, Default)]
pub struct AdjustmentStore {
    entries: HashMap<ImageId, Adjustment>,
}

impl AdjustmentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adjustment for `id`, or the default when none is stored.
    #[must_use]
    pub fn get(&self, id: ImageId) -> Adjustment {
        self.entries.get(&id).copied().unwrap_or_default()
    }

    /// Stores `adjustment` for `id`.
    ///
    /// `Adjustment` values are clamped on construction, so anything stored
    /// here is already in range.
    pub fn set(&mut self, id: ImageId, adjustment: Adjustment) {
        self.entries.insert(id, adjustment);
    }

    /// Applies `f` to the current adjustment of `id` and stores the result.
    pub fn update(&mut self, id: ImageId, f: impl FnOnce(Adjustment) -> Adjustment) -> Adjustment {
        let next = f(self.get(id));
        self.set(id, next);
        next
    }

    /// Forgets the adjustment of `id`.
    pub fn reset(&mut self, id: ImageId) {
        self.entries.remove(&id);
    }

    pub fn reset_all(&mut self) {
        self.entries.clear();
    }

    /// Returns whether `id` differs from the default adjustment.
    #[must_use]
    pub fn is_adjusted(&self, id: ImageId) -> bool {
        !self.get(id).is_default()
    }

    /// Returns whether any image differs from the default adjustment.
    #[must_use]
    pub fn any_adjusted(&self) -> bool {
        self.entries.values().any(|adjustment| !adjustment.is_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collage::adjustment_bounds;

    #[test]
    fn missing_entry_reads_as_default() {
        let store = AdjustmentStore::new();
        let adjustment = store.get(ImageId::next());
        assert_eq!(adjustment, Adjustment::default());
        assert_eq!(adjustment.offset_x.value(), 0.0);
        assert_eq!(adjustment.offset_y.value(), 0.0);
        assert_eq!(adjustment.zoom.value(), 1.0);
    }

    #[test]
    fn set_stores_clamped_values() {
        let mut store = AdjustmentStore::new();
        let id = ImageId::next();
        store.set(id, Adjustment::new(-500.0, 42.0, 9.0));

        let stored = store.get(id);
        assert_eq!(stored.offset_x.value(), adjustment_bounds::MIN_OFFSET);
        assert_eq!(stored.offset_y.value(), 42.0);
        assert_eq!(stored.zoom.value(), adjustment_bounds::MAX_ZOOM);
    }

    #[test]
    fn reset_reverts_to_default() {
        let mut store = AdjustmentStore::new();
        let id = ImageId::next();
        store.set(id, Adjustment::new(10.0, 10.0, 2.0));
        assert!(store.is_adjusted(id));

        store.reset(id);
        assert_eq!(store.get(id), Adjustment::default());
        assert!(!store.is_adjusted(id));
    }

    #[test]
    fn reset_all_clears_every_entry() {
        let mut store = AdjustmentStore::new();
        let first = ImageId::next();
        let second = ImageId::next();
        store.set(first, Adjustment::new(5.0, 0.0, 1.0));
        store.set(second, Adjustment::new(0.0, 0.0, 1.5));
        assert!(store.any_adjusted());

        store.reset_all();
        assert!(!store.any_adjusted());
        assert_eq!(store.get(first), Adjustment::default());
        assert_eq!(store.get(second), Adjustment::default());
    }

    #[test]
    fn update_pans_from_current_value() {
        let mut store = AdjustmentStore::new();
        let id = ImageId::next();
        store.set(id, Adjustment::new(80.0, 0.0, 1.0));

        let next = store.update(id, |a| a.panned(50.0, -20.0));
        assert_eq!(next.offset_x.value(), 100.0);
        assert_eq!(next.offset_y.value(), -20.0);
        assert_eq!(store.get(id), next);
    }
}
