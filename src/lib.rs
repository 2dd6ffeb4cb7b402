// SPDX-License-Identifier: MPL-2.0
//! `iced_collage` composes photo collages with the Iced GUI framework.
//!
//! Images are laid out on a grid inside a fixed-size frame, each one
//! cover-fitted into its cell and adjustable by dragging, scrolling and
//! pinching. The same render pipeline drives the on-screen preview and the
//! JPEG/PNG export, so the file matches what was shown.
//!
//! # Modules
//!
//! - [`domain`] - Value objects: grid, frame, spacing, presets, clamped ranges
//! - [`collage`] - The collage document, geometry and render pipeline
//! - [`media`] - Decoding, the bitmap cache and export encoding
//! - [`ui`] - Widgets, gesture handling and notifications
//! - [`app`] - Application state and message routing
//! - [`config`] - Persisted preferences
//! - [`i18n`] - Fluent localization

pub mod app;
pub mod collage;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_utils;
