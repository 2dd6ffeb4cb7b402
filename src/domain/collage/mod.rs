// SPDX-License-Identifier: MPL-2.0
//! Collage domain types: grid/frame/spacing specifications, presets and
//! range-checked adjustment values.

pub mod layout;
pub mod newtypes;

pub use layout::{AspectRatio, CollageLayout, FrameSpec, GridSpec, SpacingSpec};
pub use newtypes::{adjustment_bounds, ExportQuality, FrameWidth, OffsetPercent, ZoomFactor};
