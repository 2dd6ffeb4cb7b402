// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, radius};
use crate::ui::theme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Sidebar section surface.
///
/// Derived from the active theme background with a slight opacity so
/// panels stay readable in both light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Backdrop behind the collage preview.
pub fn preview(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme::preview_backdrop_color())),
        ..Default::default()
    }
}

/// Inline warning banner.
pub fn warning_banner(_theme: &Theme) -> container::Style {
    let accent = theme::warning_color();
    container::Style {
        background: Some(Background::Color(Color { a: 0.15, ..accent })),
        border: Border {
            color: accent,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
