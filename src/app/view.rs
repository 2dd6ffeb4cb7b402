// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Sidebar on the left, collage preview on the right, toasts on top.

use super::Message;
use crate::collage::Collage;
use crate::domain::collage::{AspectRatio, ExportQuality, GridSpec};
use crate::i18n::fluent::I18n;
use crate::media::ExportFormat;
use crate::ui::collage_canvas::CollageOverlay;
use crate::ui::design_tokens::spacing;
use crate::ui::notifications::{self, Toast};
use crate::ui::sidebar::{self, SidebarModel};
use crate::ui::state::GestureController;
use crate::ui::styles;
use iced::widget::{container, image, Row, Stack};
use iced::{ContentFit, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub collage: &'a Collage,
    pub gesture: &'a GestureController,
    /// Latest raster of the collage, if one could be produced.
    pub preview: Option<&'a image::Handle>,
    pub custom_grid: GridSpec,
    pub aspect_ratio: AspectRatio,
    pub export_format: ExportFormat,
    pub export_quality: ExportQuality,
    pub exporting: bool,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let sidebar = sidebar::view(
        SidebarModel {
            collage: ctx.collage,
            custom_grid: ctx.custom_grid,
            aspect_ratio: ctx.aspect_ratio,
            export_format: ctx.export_format,
            export_quality: ctx.export_quality,
            exporting: ctx.exporting,
        },
        &sidebar::ViewContext { i18n: ctx.i18n },
    );

    let content = Row::new()
        .push(sidebar)
        .push(view_preview(&ctx))
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .push(content)
        .push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// The raster image with the gesture overlay stacked on top. Both fill the
/// same bounds so the overlay's contain transform matches the image's.
fn view_preview<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);

    if let Some(handle) = ctx.preview {
        layers = layers.push(
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
        );
    }
    layers = layers.push(
        CollageOverlay::new(ctx.collage, ctx.gesture, ctx.i18n)
            .view()
            .map(Message::Gesture),
    );

    container(layers)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::preview)
        .into()
}
