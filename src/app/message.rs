// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::collage::ImageId;
use crate::domain::collage::{AspectRatio, CollageLayout};
use crate::error::Error;
use crate::media::{DecodedImage, ExportFormat};
use crate::ui::notifications;
use crate::ui::state::GestureEvent;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the file dialog to add images.
    AddImages,
    /// Result from the open file dialog.
    ImagesPicked(Vec<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Background decode finished.
    ImageDecoded {
        id: ImageId,
        result: Result<DecodedImage, Error>,
    },
    RemoveImage(ImageId),
    MoveImage {
        from: usize,
        to: usize,
    },
    ClearImages,

    LayoutSelected(CollageLayout),
    CustomRowsChanged(u32),
    CustomColsChanged(u32),
    AspectRatioSelected(AspectRatio),
    FrameWidthChanged(f32),
    /// Set the frame width to the Instagram preset.
    FitInstagram,
    GapChanged(f32),
    MarginChanged(f32),
    /// A slider was released; write the current settings to disk.
    PersistPreferences,

    /// Pointer, wheel or touch input from the preview canvas.
    Gesture(GestureEvent),
    ResetAdjustment(ImageId),
    ResetAllAdjustments,

    ExportQualityChanged(u8),
    ExportFormatSelected(ExportFormat),
    /// Open the save dialog.
    Export,
    /// Result from the save dialog.
    ExportDestination(Option<PathBuf>),
    ExportFinished(Result<PathBuf, Error>),

    Notification(notifications::NotificationMessage),
    /// Periodic tick for toast auto-dismiss.
    Tick(Instant),
    /// Next window frame while a preview raster is pending.
    RedrawFrame(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Images to add to the collage on startup, in order.
    pub files: Vec<PathBuf>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_COLLAGE_CONFIG_DIR` environment variable.
    pub config_dir: Option<PathBuf>,
}
