// SPDX-License-Identifier: MPL-2.0
//! Source images and their ordering.
//!
//! Position in the [`ImageList`] is the cell index: the first image fills
//! cell 0, the second cell 1, and so on in row-major order.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a source image, unchanged by reordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    /// Allocates a fresh id, unique for the lifetime of the process.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An image added to the collage.
///
/// Pixel data lives in the bitmap cache under the same id.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    id: ImageId,
    display_name: String,
}

impl SourceImage {
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: ImageId::next(),
            display_name: display_name.into(),
        }
    }

    /// Creates a source for a file, named after its file name.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            id: ImageId::next(),
            display_name,
        }
    }

    #[must_use]
    pub fn id(&self) -> ImageId {
        self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Ordered collection of source images.
#[derive(Debug, Clone, Default)]
pub struct ImageList {
    images: Vec<SourceImage>,
}

impl ImageList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, image: SourceImage) {
        self.images.push(image);
    }

    /// Removes the image with `id`, returning it if present.
    pub fn remove(&mut self, id: ImageId) -> Option<SourceImage> {
        let index = self.position(id)?;
        Some(self.images.remove(index))
    }

    /// Moves the image at `from` so it ends up at index `to`.
    ///
    /// Returns false and leaves the order unchanged when either index is out
    /// of bounds.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.images.len() || to >= self.images.len() {
            return false;
        }
        let image = self.images.remove(from);
        self.images.insert(to, image);
        true
    }

    #[must_use]
    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id == id)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SourceImage> {
        self.images.get(index)
    }

    #[must_use]
    pub fn find(&self, id: ImageId) -> Option<&SourceImage> {
        self.images.iter().find(|image| image.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ImageId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceImage> {
        self.images.iter()
    }

    pub fn clear(&mut self) -> Vec<SourceImage> {
        std::mem::take(&mut self.images)
    }
}
