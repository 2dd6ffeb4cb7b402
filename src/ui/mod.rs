// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module follows the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`sidebar`] - Image list, layout, frame, spacing, adjustment and export controls
//! - [`collage_canvas`] - Gesture overlay and cell labels drawn over the preview
//!
//! # Shared Infrastructure
//!
//! - [`state`] - Gesture state machine and input capture scope
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theme`] - Theme colors and styling helpers
//! - [`notifications`] - Toast notification system for user feedback

pub mod collage_canvas;
pub mod design_tokens;
pub mod notifications;
pub mod sidebar;
pub mod state;
pub mod styles;
pub mod theme;
