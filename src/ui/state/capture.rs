// SPDX-License-Identifier: MPL-2.0
//! Input-capture scope for canvas gestures.
//!
//! While any [`CaptureGuard`] is alive the collage canvas claims pointer,
//! wheel and touch events so surrounding widgets (the scrollable sidebar,
//! the window) do not also react to them. Dropping the guard releases the
//! scope, so every path out of an interaction restores default handling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared capture counter. Cloning yields a handle to the same scope.
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    holders: Arc<AtomicUsize>,
}

impl InputCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters the scope until the returned guard is dropped.
    #[must_use = "the capture is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> CaptureGuard {
        self.holders.fetch_add(1, Ordering::AcqRel);
        CaptureGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    /// Returns whether at least one guard is alive.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }
}

/// Keeps the capture scope entered while alive.
#[derive(Debug)]
pub struct CaptureGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let capture = InputCapture::new();
        assert!(!capture.is_captured());

        let guard = capture.acquire();
        assert!(capture.is_captured());

        drop(guard);
        assert!(!capture.is_captured());
    }

    #[test]
    fn overlapping_guards_keep_scope_until_last_drop() {
        let capture = InputCapture::new();
        let first = capture.acquire();
        let second = capture.clone().acquire();

        drop(first);
        assert!(capture.is_captured());
        drop(second);
        assert!(!capture.is_captured());
    }
}
