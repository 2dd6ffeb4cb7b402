// SPDX-License-Identifier: MPL-2.0
//! Shared UI color helpers.

use crate::ui::design_tokens::palette;
use iced::Color;

/// Neutral backdrop around the collage preview, distinct from the white frame.
pub fn preview_backdrop_color() -> Color {
    palette::GRAY_700
}

pub fn error_text_color() -> Color {
    palette::ERROR_500
}

pub fn warning_color() -> Color {
    palette::WARNING_500
}

/// Secondary labels (value read-outs, hints).
pub fn muted_text_color() -> Color {
    palette::GRAY_400
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_is_not_frame_white() {
        assert_ne!(preview_backdrop_color(), Color::WHITE);
    }
}
