// SPDX-License-Identifier: MPL-2.0
//! Sidebar layout composition.
//!
//! Sections, top to bottom: images, layout, frame, spacing, adjustments and
//! export. Every control emits an [`app::Message`](crate::app::Message).

use crate::app::Message;
use crate::collage::{Collage, SourceImage};
use crate::config::{
    FRAME_WIDTH_STEP, MAX_EXPORT_QUALITY, MAX_FRAME_WIDTH, MAX_GAP, MAX_GRID_DIMENSION,
    MAX_MARGIN, MIN_EXPORT_QUALITY, MIN_FRAME_WIDTH, MIN_GAP, MIN_GRID_DIMENSION, MIN_MARGIN,
};
use crate::domain::collage::{AspectRatio, CollageLayout, ExportQuality, GridSpec};
use crate::i18n::fluent::I18n;
use crate::media::{ExportFormat, LoadState};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theme;
use fluent_bundle::FluentValue;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, container, image, pick_list, slider, text, Column, Row, Scrollable, Space};
use iced::{alignment::Vertical, ContentFit, Element, Length, Theme};
use std::fmt;

/// Everything the sidebar shows.
pub struct SidebarModel<'a> {
    pub collage: &'a Collage,
    /// Rows and columns offered for the custom layout.
    pub custom_grid: GridSpec,
    pub aspect_ratio: AspectRatio,
    pub export_format: ExportFormat,
    pub export_quality: ExportQuality,
    /// An export is being written.
    pub exporting: bool,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
}

pub fn view<'a>(model: SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let sections = Column::new()
        .spacing(spacing::SM)
        .padding(spacing::SM)
        .push(images_section(&model, ctx))
        .push(layout_section(&model, ctx))
        .push(frame_section(&model, ctx))
        .push(spacing_section(&model, ctx))
        .push(adjustments_section(&model, ctx))
        .push(export_section(&model, ctx));

    let scrollable = Scrollable::new(sections)
        .direction(Direction::Vertical(Scrollbar::new()))
        .height(Length::Fill);

    container(scrollable)
        .width(Length::Fixed(sizing::SIDEBAR_WIDTH))
        .height(Length::Fill)
        .into()
}

fn section<'a>(title: String, content: Column<'a, Message>) -> Element<'a, Message> {
    container(
        Column::new()
            .spacing(spacing::XS)
            .push(text(title).size(typography::TITLE_SM))
            .push(content),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(styles::container::panel)
    .into()
}

fn caption<'a>(content: String) -> Element<'a, Message> {
    text(content)
        .size(typography::CAPTION)
        .style(|_theme: &Theme| text::Style {
            color: Some(theme::muted_text_color()),
        })
        .into()
}

fn warning<'a>(content: String) -> Element<'a, Message> {
    container(text(content).size(typography::BODY_SM))
        .padding(spacing::XS)
        .width(Length::Fill)
        .style(styles::container::warning_banner)
        .into()
}

/// Small square button; disabled when `message` is `None`.
fn icon_button<'a>(label: &'a str, message: Option<Message>) -> Element<'a, Message> {
    let btn = button(text(label).size(typography::BODY)).padding([0.0, spacing::XS]);
    match message {
        Some(message) => btn.on_press(message).style(styles::button::unselected).into(),
        None => btn.style(styles::button::disabled()).into(),
    }
}

// =============================================================================
// Images
// =============================================================================

fn images_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let collage = model.collage;
    let count = collage.image_count();

    let add_button = button(text(ctx.i18n.tr("sidebar-add-images")).size(typography::BODY))
        .padding(spacing::XS)
        .width(Length::Fill)
        .on_press(Message::AddImages)
        .style(styles::button::primary);

    let mut content = Column::new().spacing(spacing::XS).push(add_button);

    if count == 0 {
        content = content.push(caption(ctx.i18n.tr("sidebar-images-empty")));
    }

    for (index, source) in collage.images().iter().enumerate() {
        content = content.push(image_row(collage, source, index, count, ctx));
    }

    if count > 0 {
        let clear = button(text(ctx.i18n.tr("sidebar-clear-images")).size(typography::BODY_SM))
            .padding(spacing::XXS)
            .on_press(Message::ClearImages)
            .style(styles::button::unselected);
        content = content.push(clear);
    }

    let overflow = collage.overflow();
    if overflow > 0 {
        content = content.push(warning(ctx.i18n.tr_with_args(
            "overflow-warning",
            &[("count", FluentValue::from(overflow))],
        )));
    }

    let title = ctx
        .i18n
        .tr_with_args("sidebar-images-title", &[("count", FluentValue::from(count))]);
    section(title, content)
}

fn image_row<'a>(
    collage: &'a Collage,
    source: &'a SourceImage,
    index: usize,
    count: usize,
    ctx: &ViewContext<'a>,
) -> Element<'a, Message> {
    let thumbnail: Element<'a, Message> = match collage.load_state(source.id()) {
        Some(LoadState::Loaded(decoded)) => image(decoded.handle.clone())
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL))
            .content_fit(ContentFit::Cover)
            .into(),
        _ => Space::new()
            .width(Length::Fixed(sizing::THUMBNAIL))
            .height(Length::Fixed(sizing::THUMBNAIL))
            .into(),
    };

    let mut name_column = Column::new()
        .width(Length::Fill)
        .push(text(source.display_name()).size(typography::BODY_SM));
    match collage.load_state(source.id()) {
        Some(LoadState::Pending) => {
            name_column = name_column.push(caption(ctx.i18n.tr("cell-loading")));
        }
        Some(LoadState::Failed(_)) => {
            name_column = name_column.push(
                text(ctx.i18n.tr("cell-failed"))
                    .size(typography::CAPTION)
                    .style(|_theme: &Theme| text::Style {
                        color: Some(theme::error_text_color()),
                    }),
            );
        }
        _ => {}
    }

    let up = (index > 0).then(|| Message::MoveImage {
        from: index,
        to: index - 1,
    });
    let down = (index + 1 < count).then(|| Message::MoveImage {
        from: index,
        to: index + 1,
    });

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(thumbnail)
        .push(name_column)
        .push(icon_button("↑", up))
        .push(icon_button("↓", down))
        .push(icon_button("×", Some(Message::RemoveImage(source.id()))))
        .into()
}

// =============================================================================
// Layout
// =============================================================================

fn layout_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let current = model.collage.layout();

    let mut presets = Row::new().spacing(spacing::XXS);
    let mut rows = Column::new().spacing(spacing::XXS);
    for (i, preset) in CollageLayout::ALL_PRESETS.into_iter().enumerate() {
        if i > 0 && i % 4 == 0 {
            rows = rows.push(presets);
            presets = Row::new().spacing(spacing::XXS);
        }
        presets = presets.push(layout_button(
            ctx.i18n.tr(preset.i18n_key()),
            preset,
            current == preset,
        ));
    }
    let custom = CollageLayout::custom(model.custom_grid.rows(), model.custom_grid.cols());
    presets = presets.push(layout_button(
        ctx.i18n.tr("layout-custom"),
        custom,
        current.is_custom(),
    ));
    rows = rows.push(presets);

    let mut content = Column::new().spacing(spacing::XS).push(rows);

    if current.is_custom() {
        let grid = current.grid();
        content = content
            .push(dimension_slider(
                ctx.i18n.tr_with_args("layout-rows", &[("value", FluentValue::from(grid.rows()))]),
                grid.rows(),
                Message::CustomRowsChanged,
            ))
            .push(dimension_slider(
                ctx.i18n.tr_with_args("layout-cols", &[("value", FluentValue::from(grid.cols()))]),
                grid.cols(),
                Message::CustomColsChanged,
            ));
    }

    if model.collage.geometry().cell_size().is_err() {
        content = content.push(warning(ctx.i18n.tr("error-invalid-layout")));
    }

    section(ctx.i18n.tr("sidebar-layout-title"), content)
}

fn layout_button<'a>(label: String, layout: CollageLayout, active: bool) -> Element<'a, Message> {
    button(text(label).size(typography::BODY_SM))
        .padding([spacing::XXS, spacing::XS])
        .on_press(Message::LayoutSelected(layout))
        .style(if active {
            styles::button::selected
        } else {
            styles::button::unselected
        })
        .into()
}

fn dimension_slider<'a>(
    label: String,
    value: u32,
    on_change: fn(u32) -> Message,
) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(text(label).size(typography::BODY_SM))
        .push(
            slider(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION, value, on_change)
                .step(1u32)
                .on_release(Message::PersistPreferences),
        )
        .into()
}

// =============================================================================
// Frame
// =============================================================================

/// Aspect ratio entry of the picker, labelled in the current language.
#[derive(Debug, Clone, PartialEq)]
struct AspectChoice {
    ratio: AspectRatio,
    label: String,
}

impl fmt::Display for AspectChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {}", self.ratio.notation(), self.label)
    }
}

fn frame_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let choices: Vec<AspectChoice> = AspectRatio::ALL
        .into_iter()
        .map(|ratio| AspectChoice {
            ratio,
            label: ctx.i18n.tr(ratio.i18n_key()),
        })
        .collect();
    let selected = choices.iter().find(|c| c.ratio == model.aspect_ratio).cloned();
    let aspect_picker = pick_list(choices, selected, |choice: AspectChoice| {
        Message::AspectRatioSelected(choice.ratio)
    })
    .width(Length::Fill);

    let frame = model.collage.frame();
    let (pixel_width, pixel_height) = frame.pixel_size();
    let size_label = ctx.i18n.tr_with_args(
        "frame-size",
        &[
            ("width", FluentValue::from(pixel_width)),
            ("height", FluentValue::from(pixel_height)),
        ],
    );

    let width_slider = slider(
        MIN_FRAME_WIDTH..=MAX_FRAME_WIDTH,
        frame.width(),
        Message::FrameWidthChanged,
    )
    .step(FRAME_WIDTH_STEP)
    .on_release(Message::PersistPreferences);

    let instagram = button(text(ctx.i18n.tr("frame-fit-instagram")).size(typography::BODY_SM))
        .padding(spacing::XXS)
        .on_press(Message::FitInstagram)
        .style(styles::button::unselected);

    let content = Column::new()
        .spacing(spacing::XS)
        .push(text(ctx.i18n.tr("frame-aspect-ratio")).size(typography::BODY_SM))
        .push(aspect_picker)
        .push(text(ctx.i18n.tr("frame-width")).size(typography::BODY_SM))
        .push(width_slider)
        .push(
            Row::new()
                .spacing(spacing::XS)
                .align_y(Vertical::Center)
                .push(container(caption(size_label)).width(Length::Fill))
                .push(instagram),
        );

    section(ctx.i18n.tr("sidebar-frame-title"), content)
}

// =============================================================================
// Spacing
// =============================================================================

fn spacing_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let spacing_spec = model.collage.spacing();

    let gap = Column::new()
        .spacing(spacing::XXS)
        .push(text(px_label(ctx, "spacing-gap", spacing_spec.gap())).size(typography::BODY_SM))
        .push(
            slider(MIN_GAP..=MAX_GAP, spacing_spec.gap(), Message::GapChanged)
                .step(1.0)
                .on_release(Message::PersistPreferences),
        );

    let margin = Column::new()
        .spacing(spacing::XXS)
        .push(text(px_label(ctx, "spacing-margin", spacing_spec.margin())).size(typography::BODY_SM))
        .push(
            slider(MIN_MARGIN..=MAX_MARGIN, spacing_spec.margin(), Message::MarginChanged)
                .step(1.0)
                .on_release(Message::PersistPreferences),
        );

    section(
        ctx.i18n.tr("sidebar-spacing-title"),
        Column::new().spacing(spacing::SM).push(gap).push(margin),
    )
}

fn px_label(ctx: &ViewContext<'_>, key: &str, value: f32) -> String {
    ctx.i18n
        .tr_with_args(key, &[("value", FluentValue::from(value.round() as i64))])
}

// =============================================================================
// Adjustments
// =============================================================================

fn adjustments_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let collage = model.collage;
    let adjustments = collage.adjustments();
    let mut content = Column::new().spacing(spacing::XS);

    let adjusted: Vec<&SourceImage> = collage
        .images()
        .iter()
        .filter(|source| adjustments.is_adjusted(source.id()))
        .collect();

    if adjusted.is_empty() {
        content = content.push(caption(ctx.i18n.tr("adjustments-hint")));
    }

    for source in adjusted {
        let adjustment = collage.adjustment(source.id());
        let position = ctx.i18n.tr_with_args(
            "adjustments-position",
            &[
                ("x", FluentValue::from(adjustment.offset_x.value().round() as i64)),
                ("y", FluentValue::from(adjustment.offset_y.value().round() as i64)),
            ],
        );
        let zoom = format!("{:.2}×", adjustment.zoom.value());

        let reset = button(text(ctx.i18n.tr("adjustments-reset")).size(typography::BODY_SM))
            .padding(spacing::XXS)
            .on_press(Message::ResetAdjustment(source.id()))
            .style(styles::button::unselected);

        content = content.push(
            Row::new()
                .spacing(spacing::XS)
                .align_y(Vertical::Center)
                .push(
                    Column::new()
                        .width(Length::Fill)
                        .push(text(source.display_name()).size(typography::BODY_SM))
                        .push(caption(format!("{position} · {zoom}"))),
                )
                .push(reset),
        );
    }

    if adjustments.any_adjusted() {
        let reset_all = button(text(ctx.i18n.tr("adjustments-reset-all")).size(typography::BODY_SM))
            .padding(spacing::XXS)
            .width(Length::Fill)
            .on_press(Message::ResetAllAdjustments)
            .style(styles::button::unselected);
        content = content.push(reset_all);
    }

    section(ctx.i18n.tr("sidebar-adjustments-title"), content)
}

// =============================================================================
// Export
// =============================================================================

fn export_section<'a>(model: &SidebarModel<'a>, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let format_picker = pick_list(
        &ExportFormat::ALL[..],
        Some(model.export_format),
        Message::ExportFormatSelected,
    )
    .width(Length::Fill);

    let mut content = Column::new()
        .spacing(spacing::XS)
        .push(text(ctx.i18n.tr("export-format")).size(typography::BODY_SM))
        .push(format_picker);

    if model.export_format == ExportFormat::Jpeg {
        let quality = model.export_quality.value();
        content = content
            .push(
                text(ctx.i18n.tr_with_args("export-quality", &[("value", FluentValue::from(quality))]))
                    .size(typography::BODY_SM),
            )
            .push(
                slider(
                    MIN_EXPORT_QUALITY..=MAX_EXPORT_QUALITY,
                    quality,
                    Message::ExportQualityChanged,
                )
                .step(1u8)
                .on_release(Message::PersistPreferences),
            );
    }

    let label = if model.exporting {
        ctx.i18n.tr("export-in-progress")
    } else {
        ctx.i18n.tr("export-button")
    };
    let export_button = button(text(label).size(typography::BODY_LG))
        .padding(spacing::XS)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT));
    let can_export = model.collage.image_count() > 0 && !model.exporting;
    let export_button = if can_export {
        export_button.on_press(Message::Export).style(styles::button::primary)
    } else {
        export_button.style(styles::button::disabled())
    };
    content = content.push(export_button);

    section(ctx.i18n.tr("sidebar-export-title"), content)
}
