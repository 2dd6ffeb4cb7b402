// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects and business rules.
//!
//! Nothing here touches iced, the filesystem or the decoder, so every type
//! can be tested in isolation.
//!
//! # Modules
//!
//! - [`collage`]: Collage specifications ([`GridSpec`](collage::GridSpec),
//!   [`FrameSpec`](collage::FrameSpec), [`SpacingSpec`](collage::SpacingSpec)),
//!   presets ([`CollageLayout`](collage::CollageLayout),
//!   [`AspectRatio`](collage::AspectRatio)) and adjustment values
//!   ([`OffsetPercent`](collage::OffsetPercent), [`ZoomFactor`](collage::ZoomFactor))

pub mod collage;
