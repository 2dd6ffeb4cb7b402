// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Interaction state lives here, apart from the `App` struct, so it can be
//! driven and tested without a window.

pub mod capture;
pub mod gesture;

pub use capture::{CaptureGuard, InputCapture};
pub use gesture::{Effect, GestureController, GestureEvent, ViewTransform};
