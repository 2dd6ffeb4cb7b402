// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the collage document, the gesture controller and
//! the persisted preferences, and translates messages into side effects such
//! as background decoding, file dialogs, export and config persistence. The
//! preview raster is rebuilt here, after each message that changed the
//! collage, so the screen always shows exactly what an export would write
//! plus the hover highlight. Canvas gestures arrive faster than the screen
//! refreshes, so their rasters are deferred to the next window frame.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::collage::raster::{rasterize, to_straight_rgba};
use crate::collage::Collage;
use crate::config::{self, Config};
use crate::domain::collage::{AspectRatio, ExportQuality, GridSpec};
use crate::i18n::fluent::I18n;
use crate::media::ExportFormat;
use crate::ui::notifications::{self, Notification};
use crate::ui::state::{GestureController, InputCapture};
use iced::widget::image;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    collage: Collage,
    gesture: GestureController,
    /// Raster of the collage as shown on screen.
    preview: Option<image::Handle>,
    preview_dirty: bool,
    /// Rows and columns offered for the custom layout.
    custom_grid: GridSpec,
    aspect_ratio: AspectRatio,
    export_format: ExportFormat,
    export_quality: ExportQuality,
    exporting: bool,
    last_directory: Option<PathBuf>,
    config: Config,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("images", &self.collage.image_count())
            .field("layout", &self.collage.layout())
            .field("exporting", &self.exporting)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_WIDTH: f32 = 1200.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 900.0;
pub const MIN_WINDOW_HEIGHT: f32 = 600.0;

pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    paths::init_cli_overrides(flags.config_dir.clone());

    // iced 0.14 requires an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(I18n::default(), Config::default())
    }
}

impl App {
    fn with_config(i18n: I18n, config: Config) -> Self {
        let layout = config.collage.layout();
        let custom_grid = if layout.is_custom() {
            layout.grid()
        } else {
            GridSpec::new(2, 2)
        };

        let mut app = Self {
            i18n,
            collage: Collage::new(layout, config.collage.frame(), config.collage.spacing()),
            gesture: GestureController::new(InputCapture::new()),
            preview: None,
            preview_dirty: true,
            custom_grid,
            aspect_ratio: config.collage.aspect_ratio(),
            export_format: config.export.format(),
            export_quality: config.export.quality(),
            exporting: false,
            last_directory: None,
            config,
            notifications: notifications::Manager::new(),
        };
        app.refresh_preview();
        app
    }

    /// Loads preferences, then adds the images given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let mut app = Self::with_config(i18n, config);

        if let Some(key) = config_warning {
            app.notifications.push(Notification::warning(key));
        }

        let task = app.with_update_context(|ctx| update::add_paths(ctx, flags.files));
        app.refresh_preview();
        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.collage.image_count() {
            0 => app_name,
            count => {
                let images = self.i18n.tr_with_args(
                    "window-title-images",
                    &[("count", fluent_bundle::FluentValue::from(count))],
                );
                format!("{images} - {app_name}")
            }
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
            subscription::create_redraw_subscription(self.preview_dirty),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let defer_preview = matches!(message, Message::Gesture(_));
        let task = match message {
            Message::AddImages => update::handle_add_images(self.last_directory.clone()),
            Message::ImagesPicked(paths) => {
                self.with_update_context(|ctx| update::add_paths(ctx, paths))
            }
            Message::FileDropped(path) => {
                self.with_update_context(|ctx| update::add_paths(ctx, vec![path]))
            }
            Message::Export => update::handle_export(self.export_format, self.last_directory.clone()),
            Message::ExportDestination(path) => {
                self.with_update_context(|ctx| update::handle_export_destination(ctx, path))
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::Tick(now) => {
                self.notifications.tick(now);
                Task::none()
            }
            Message::RedrawFrame(_) => Task::none(),
            other => {
                self.with_update_context(|ctx| {
                    handle_state_message(ctx, other);
                    Task::none()
                })
            }
        };

        if !defer_preview {
            self.refresh_preview();
        }
        task
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            collage: &self.collage,
            gesture: &self.gesture,
            preview: self.preview.as_ref(),
            custom_grid: self.custom_grid,
            aspect_ratio: self.aspect_ratio,
            export_format: self.export_format,
            export_quality: self.export_quality,
            exporting: self.exporting,
            notifications: &self.notifications,
        })
    }

    fn with_update_context<R>(&mut self, f: impl FnOnce(&mut update::UpdateContext<'_>) -> R) -> R {
        let mut ctx = update::UpdateContext {
            collage: &mut self.collage,
            gesture: &mut self.gesture,
            notifications: &mut self.notifications,
            config: &mut self.config,
            custom_grid: &mut self.custom_grid,
            aspect_ratio: &mut self.aspect_ratio,
            export_format: &mut self.export_format,
            export_quality: &mut self.export_quality,
            exporting: &mut self.exporting,
            preview_dirty: &mut self.preview_dirty,
            last_directory: &mut self.last_directory,
        };
        f(&mut ctx)
    }

    /// Re-rasterizes the collage with the current hover highlight.
    fn refresh_preview(&mut self) {
        if !std::mem::take(&mut self.preview_dirty) {
            return;
        }
        match rasterize(&self.collage, self.gesture.hovered_cell()) {
            Ok((pixmap, _)) => {
                let (width, height) = (pixmap.width(), pixmap.height());
                self.preview = Some(image::Handle::from_rgba(width, height, to_straight_rgba(&pixmap)));
            }
            Err(err) => {
                tracing::warn!(error = %err, "preview raster failed");
                self.preview = None;
            }
        }
    }
}

/// Handles messages that only touch collage and preference state.
fn handle_state_message(ctx: &mut update::UpdateContext<'_>, message: Message) {
    match message {
        Message::ImageDecoded { id, result } => update::handle_image_decoded(ctx, id, result),
        Message::RemoveImage(id) => update::handle_remove_image(ctx, id),
        Message::MoveImage { from, to } => update::handle_move_image(ctx, from, to),
        Message::ClearImages => update::handle_clear_images(ctx),
        Message::LayoutSelected(layout) => update::handle_layout_selected(ctx, layout),
        Message::CustomRowsChanged(rows) => update::handle_custom_grid(ctx, Some(rows), None),
        Message::CustomColsChanged(cols) => update::handle_custom_grid(ctx, None, Some(cols)),
        Message::AspectRatioSelected(ratio) => update::handle_aspect_ratio_selected(ctx, ratio),
        Message::FrameWidthChanged(width) => update::handle_frame_width_changed(ctx, width),
        Message::FitInstagram => update::handle_fit_instagram(ctx),
        Message::GapChanged(gap) => update::handle_spacing_changed(ctx, Some(gap), None),
        Message::MarginChanged(margin) => update::handle_spacing_changed(ctx, None, Some(margin)),
        Message::PersistPreferences => update::persist_preferences(ctx),
        Message::Gesture(event) => update::handle_gesture(ctx, event),
        Message::ResetAdjustment(id) => update::handle_reset_adjustment(ctx, id),
        Message::ResetAllAdjustments => update::handle_reset_all_adjustments(ctx),
        Message::ExportQualityChanged(quality) => {
            *ctx.export_quality = ExportQuality::new(quality);
        }
        Message::ExportFormatSelected(format) => {
            *ctx.export_format = format;
            update::persist_preferences(ctx);
        }
        Message::ExportFinished(result) => update::handle_export_finished(ctx, result),
        Message::AddImages
        | Message::ImagesPicked(_)
        | Message::FileDropped(_)
        | Message::Export
        | Message::ExportDestination(_)
        | Message::Notification(_)
        | Message::Tick(_)
        | Message::RedrawFrame(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::SourceImage;
    use crate::domain::collage::CollageLayout;
    use crate::test_utils::solid_image;
    use crate::ui::state::GestureEvent;
    use iced::Point;

    fn app_with_loaded_image() -> (App, crate::collage::ImageId) {
        let mut app = App::default();
        app.collage.set_layout(CollageLayout::OneByOne);
        let id = app.collage.add_image(SourceImage::new("solid"));
        let decoded = solid_image(2, 2, [200, 120, 40]);
        let _ = app.update(Message::ImageDecoded {
            id,
            result: Ok(decoded),
        });
        (app, id)
    }

    #[test]
    fn default_app_has_a_preview() {
        let app = App::default();
        assert!(app.preview.is_some());
        assert!(!app.preview_dirty);
    }

    #[test]
    fn wheel_gesture_adjusts_and_redraws() {
        let (mut app, id) = app_with_loaded_image();
        let center = Point::new(app.collage.frame().width() / 2.0, app.collage.frame().height() / 2.0);

        let _ = app.update(Message::Gesture(GestureEvent::Wheel {
            position: center,
            delta_y: -100.0,
        }));
        assert!(app.collage.adjustment(id).zoom.is_zoomed_in());

        let _ = app.update(Message::ResetAllAdjustments);
        assert!(!app.collage.adjustments().any_adjusted());
    }

    #[test]
    fn removing_the_dragged_image_releases_capture() {
        let (mut app, id) = app_with_loaded_image();
        let center = Point::new(app.collage.frame().width() / 2.0, app.collage.frame().height() / 2.0);

        let _ = app.update(Message::Gesture(GestureEvent::PointerPressed(center)));
        assert!(app.gesture.is_captured());

        let _ = app.update(Message::RemoveImage(id));
        assert!(!app.gesture.is_captured());
        assert_eq!(app.collage.image_count(), 0);
    }

    #[test]
    fn drag_rasters_once_per_frame() {
        let (mut app, id) = app_with_loaded_image();
        let center = Point::new(app.collage.frame().width() / 2.0, app.collage.frame().height() / 2.0);
        let _ = app.update(Message::Gesture(GestureEvent::Wheel {
            position: center,
            delta_y: -100.0,
        }));
        let _ = app.update(Message::RedrawFrame(std::time::Instant::now()));
        let before = app.preview.as_ref().map(image::Handle::id);

        let _ = app.update(Message::Gesture(GestureEvent::PointerPressed(center)));
        for dx in [10.0, 20.0, 30.0] {
            let moved = Point::new(center.x + dx, center.y);
            let _ = app.update(Message::Gesture(GestureEvent::PointerMoved(moved)));
        }
        assert!(app.collage.adjustment(id).offset_x.value() != 0.0);
        assert!(app.preview_dirty);
        assert_eq!(app.preview.as_ref().map(image::Handle::id), before);

        let _ = app.update(Message::RedrawFrame(std::time::Instant::now()));
        assert!(!app.preview_dirty);
        assert_ne!(app.preview.as_ref().map(image::Handle::id), before);
    }

    #[test]
    fn failed_decode_notifies_and_marks_the_image() {
        let mut app = App::default();
        let id = app.collage.add_image(SourceImage::new("broken.png"));
        let _ = app.update(Message::ImageDecoded {
            id,
            result: Err(crate::error::Error::Io("truncated file".into())),
        });
        assert_eq!(app.notifications.visible_count(), 1);
        assert!(app.collage.load_state(id).is_some_and(|state| state.is_failed()));
    }

    #[test]
    fn custom_rows_keep_columns() {
        let mut app = App::default();
        let _ = app.update(Message::CustomColsChanged(4));
        let _ = app.update(Message::CustomRowsChanged(3));
        let grid = app.collage.layout().grid();
        assert!(app.collage.layout().is_custom());
        assert_eq!((grid.rows(), grid.cols()), (3, 4));
    }

    #[test]
    fn export_quality_is_clamped() {
        let mut app = App::default();
        let _ = app.update(Message::ExportQualityChanged(0));
        assert_eq!(app.export_quality, ExportQuality::new(crate::config::MIN_EXPORT_QUALITY));
    }
}
