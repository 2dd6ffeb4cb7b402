// SPDX-License-Identifier: MPL-2.0
//! Decoded bitmaps keyed by image id.
//!
//! Entries are inserted when a decode finishes and evicted explicitly when
//! their image leaves the collage; nothing expires on its own.

use super::image::DecodedImage;
use crate::collage::source::ImageId;
use std::collections::HashMap;

/// Decode status of one image.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Decode requested, not finished.
    Pending,
    Loaded(DecodedImage),
    /// Decode failed. Terminal: the image is never retried.
    Failed(String),
}

impl LoadState {
    #[must_use]
    pub fn image(&self) -> Option<&DecodedImage> {
        match self {
            LoadState::Loaded(image) => Some(image),
            LoadState::Pending | LoadState::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BitmapCache {
    entries: HashMap<ImageId, LoadState>,
}

impl BitmapCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_pending(&mut self, id: ImageId) {
        self.entries.insert(id, LoadState::Pending);
    }

    pub fn insert(&mut self, id: ImageId, image: DecodedImage) {
        self.entries.insert(id, LoadState::Loaded(image));
    }

    pub fn mark_failed(&mut self, id: ImageId, reason: impl Into<String>) {
        self.entries.insert(id, LoadState::Failed(reason.into()));
    }

    /// Drops the entry for `id`, releasing its pixels.
    pub fn evict(&mut self, id: ImageId) -> Option<LoadState> {
        self.entries.remove(&id)
    }

    #[must_use]
    pub fn state(&self, id: ImageId) -> Option<&LoadState> {
        self.entries.get(&id)
    }

    /// Decoded image for `id`, if loaded.
    #[must_use]
    pub fn get(&self, id: ImageId) -> Option<&DecodedImage> {
        self.entries.get(&id).and_then(LoadState::image)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> DecodedImage {
        DecodedImage::from_rgba(1, 1, vec![0, 0, 0, 255]).expect("valid image")
    }

    #[test]
    fn lifecycle_pending_to_loaded_to_evicted() {
        let mut cache = BitmapCache::new();
        let id = ImageId::next();

        cache.mark_pending(id);
        assert!(matches!(cache.state(id), Some(LoadState::Pending)));
        assert!(cache.get(id).is_none());

        cache.insert(id, pixel());
        assert!(cache.get(id).is_some());

        assert!(cache.evict(id).is_some());
        assert!(cache.state(id).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn failure_is_recorded() {
        let mut cache = BitmapCache::new();
        let id = ImageId::next();
        cache.mark_failed(id, "broken header");
        assert!(cache.state(id).is_some_and(LoadState::is_failed));
        assert!(cache.get(id).is_none());
    }
}
