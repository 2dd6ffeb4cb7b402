// SPDX-License-Identifier: MPL-2.0
//! Message handlers for the application.
//!
//! Handlers receive an [`UpdateContext`] borrowing the parts of `App` they
//! may touch and return the follow-up [`Task`]. Anything that changes what
//! the collage looks like sets `preview_dirty`; `App::update` re-rasterizes
//! once per message.

use super::Message;
use crate::collage::raster::rasterize;
use crate::collage::{Collage, ImageId, SourceImage};
use crate::config::{self, Config, INSTAGRAM_FRAME_WIDTH};
use crate::domain::collage::{
    AspectRatio, CollageLayout, ExportQuality, FrameSpec, FrameWidth, GridSpec, SpacingSpec,
};
use crate::error::Error;
use crate::media::{self, export, DecodedImage, ExportFormat};
use crate::ui::notifications::{self, Notification};
use crate::ui::state::{Effect, GestureController, GestureEvent};
use iced::Task;
use std::path::{Path, PathBuf};

/// Mutable view of the application state used by the handlers.
pub struct UpdateContext<'a> {
    pub collage: &'a mut Collage,
    pub gesture: &'a mut GestureController,
    pub notifications: &'a mut notifications::Manager,
    pub config: &'a mut Config,
    pub custom_grid: &'a mut GridSpec,
    pub aspect_ratio: &'a mut AspectRatio,
    pub export_format: &'a mut ExportFormat,
    pub export_quality: &'a mut ExportQuality,
    pub exporting: &'a mut bool,
    pub preview_dirty: &'a mut bool,
    /// Directory of the last image added, offered by the next dialog.
    pub last_directory: &'a mut Option<PathBuf>,
}

// =============================================================================
// Images
// =============================================================================

/// Opens the multi-select image dialog.
pub fn handle_add_images(last_directory: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter("Images", media::extensions::IMAGE_EXTENSIONS);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog
                .pick_files()
                .await
                .map(|handles| handles.iter().map(|h| h.path().to_path_buf()).collect())
                .unwrap_or_default()
        },
        Message::ImagesPicked,
    )
}

/// Appends `paths` to the collage and starts decoding each one.
///
/// Unsupported files are skipped with a warning.
pub fn add_paths(ctx: &mut UpdateContext<'_>, paths: Vec<PathBuf>) -> Task<Message> {
    let mut tasks = Vec::new();

    for path in paths {
        if !media::is_supported_image(&path) {
            ctx.notifications.push(
                Notification::warning("file-unsupported").with_arg("name", file_name(&path)),
            );
            continue;
        }
        if let Some(parent) = path.parent() {
            *ctx.last_directory = Some(parent.to_path_buf());
        }

        let id = ctx.collage.add_image(SourceImage::from_path(path.clone()));
        tasks.push(Task::perform(media::load_image_async(path), move |result| {
            Message::ImageDecoded { id, result }
        }));
    }

    if !tasks.is_empty() {
        *ctx.preview_dirty = true;
    }
    Task::batch(tasks)
}

pub fn handle_image_decoded(
    ctx: &mut UpdateContext<'_>,
    id: ImageId,
    result: Result<DecodedImage, Error>,
) {
    if result.is_err() {
        if let Some(source) = ctx.collage.images().find(id) {
            ctx.notifications.push(
                Notification::error("image-load-failed").with_arg("name", source.display_name()),
            );
        }
    }
    if ctx.collage.apply_decoded(id, result) {
        *ctx.preview_dirty = true;
    }
}

pub fn handle_remove_image(ctx: &mut UpdateContext<'_>, id: ImageId) {
    if ctx.gesture.target() == Some(id) {
        ctx.gesture.reset();
    }
    if ctx.collage.remove_image(id).is_some() {
        *ctx.preview_dirty = true;
    }
}

pub fn handle_move_image(ctx: &mut UpdateContext<'_>, from: usize, to: usize) {
    if ctx.collage.move_image(from, to) {
        *ctx.preview_dirty = true;
    }
}

pub fn handle_clear_images(ctx: &mut UpdateContext<'_>) {
    ctx.gesture.reset();
    ctx.collage.clear();
    *ctx.preview_dirty = true;
}

// =============================================================================
// Layout, frame and spacing
// =============================================================================

pub fn handle_layout_selected(ctx: &mut UpdateContext<'_>, layout: CollageLayout) {
    if layout.is_custom() {
        *ctx.custom_grid = layout.grid();
    }
    ctx.collage.set_layout(layout);
    *ctx.preview_dirty = true;
    persist_preferences(ctx);
}

/// Changes one dimension of the custom grid, keeping the other.
pub fn handle_custom_grid(ctx: &mut UpdateContext<'_>, rows: Option<u32>, cols: Option<u32>) {
    let grid = GridSpec::new(
        rows.unwrap_or(ctx.custom_grid.rows()),
        cols.unwrap_or(ctx.custom_grid.cols()),
    );
    *ctx.custom_grid = grid;
    ctx.collage
        .set_layout(CollageLayout::custom(grid.rows(), grid.cols()));
    *ctx.preview_dirty = true;
}

pub fn handle_aspect_ratio_selected(ctx: &mut UpdateContext<'_>, ratio: AspectRatio) {
    *ctx.aspect_ratio = ratio;
    let width = ctx.collage.frame().width();
    set_frame_width(ctx, width);
    persist_preferences(ctx);
}

pub fn handle_frame_width_changed(ctx: &mut UpdateContext<'_>, width: f32) {
    set_frame_width(ctx, width);
}

pub fn handle_fit_instagram(ctx: &mut UpdateContext<'_>) {
    set_frame_width(ctx, INSTAGRAM_FRAME_WIDTH);
    persist_preferences(ctx);
}

fn set_frame_width(ctx: &mut UpdateContext<'_>, width: f32) {
    let width = FrameWidth::new(width).value();
    match FrameSpec::new(width, ctx.aspect_ratio.value()) {
        Ok(frame) => {
            ctx.collage.set_frame(frame);
            *ctx.preview_dirty = true;
        }
        Err(err) => tracing::warn!(error = %err, "rejected frame size"),
    }
}

pub fn handle_spacing_changed(ctx: &mut UpdateContext<'_>, gap: Option<f32>, margin: Option<f32>) {
    let current = ctx.collage.spacing();
    ctx.collage.set_spacing(SpacingSpec::new(
        gap.unwrap_or(current.gap()),
        margin.unwrap_or(current.margin()),
    ));
    *ctx.preview_dirty = true;
}

// =============================================================================
// Gestures and adjustments
// =============================================================================

pub fn handle_gesture(ctx: &mut UpdateContext<'_>, event: GestureEvent) {
    match ctx.gesture.handle(event, ctx.collage) {
        Effect::None => {}
        Effect::Adjusted(_) | Effect::Redraw => *ctx.preview_dirty = true,
    }
}

pub fn handle_reset_adjustment(ctx: &mut UpdateContext<'_>, id: ImageId) {
    ctx.collage.reset_adjustment(id);
    *ctx.preview_dirty = true;
}

pub fn handle_reset_all_adjustments(ctx: &mut UpdateContext<'_>) {
    ctx.collage.reset_all_adjustments();
    *ctx.preview_dirty = true;
}

// =============================================================================
// Export
// =============================================================================

/// Opens the save dialog for the selected format.
pub fn handle_export(format: ExportFormat, last_directory: Option<PathBuf>) -> Task<Message> {
    let filename = format.default_file_name();
    let extension = [format.extension()];

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_file_name(&filename)
                .add_filter(format.label(), &extension);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            dialog.save_file().await.map(|h| h.path().to_path_buf())
        },
        Message::ExportDestination,
    )
}

/// Renders the collage without hover highlight and writes it on the
/// blocking pool. The format follows the chosen extension when it names one.
pub fn handle_export_destination(
    ctx: &mut UpdateContext<'_>,
    destination: Option<PathBuf>,
) -> Task<Message> {
    let Some(mut path) = destination else {
        return Task::none();
    };
    let format = match ExportFormat::from_path(&path) {
        Some(format) => format,
        None => {
            path.set_extension(ctx.export_format.extension());
            *ctx.export_format
        }
    };
    let quality = *ctx.export_quality;

    let pixmap = match rasterize(ctx.collage, None) {
        Ok((pixmap, _)) => pixmap,
        Err(err) => {
            handle_export_finished(ctx, Err(err));
            return Task::none();
        }
    };

    *ctx.exporting = true;
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || {
                export::save_to_file(&pixmap, &path, format, quality).map(|()| path)
            })
            .await
            .map_err(|e| Error::Export(format!("export task failed: {e}")))?
        },
        Message::ExportFinished,
    )
}

pub fn handle_export_finished(ctx: &mut UpdateContext<'_>, result: Result<PathBuf, Error>) {
    *ctx.exporting = false;
    match result {
        Ok(path) => {
            ctx.notifications
                .push(Notification::success("export-success").with_arg("name", file_name(&path)));
        }
        Err(err) => {
            tracing::error!(error = %err, "export failed");
            ctx.notifications
                .push(Notification::error("export-failed").with_arg("reason", err.to_string()));
        }
    }
}

// =============================================================================
// Preferences
// =============================================================================

/// Copies the current collage and export settings into the config and
/// writes it. Failures are reported but never interrupt the session.
pub fn persist_preferences(ctx: &mut UpdateContext<'_>) {
    let frame = ctx.collage.frame();
    let spacing = ctx.collage.spacing();

    let collage = &mut ctx.config.collage;
    collage.layout = Some(ctx.collage.layout());
    collage.aspect_ratio = Some(*ctx.aspect_ratio);
    collage.frame_width = Some(frame.width());
    collage.gap = Some(spacing.gap());
    collage.margin = Some(spacing.margin());

    ctx.config.export.format = Some(*ctx.export_format);
    ctx.config.export.quality = Some(ctx.export_quality.value());

    if let Err(err) = config::save(ctx.config) {
        tracing::warn!(error = %err, "failed to save preferences");
        ctx.notifications.push(Notification::warning("config-save-error"));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
