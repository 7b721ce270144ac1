// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Dialog surface on top of the backdrop.
pub fn dialog(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette_ext.background.base.color)),
        text_color: Some(palette_ext.background.base.text),
        border: Border {
            color: palette_ext.background.strong.color,
            width: 1.0,
            radius: radius::LG.into(),
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Dimmed area behind a modal.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// White sheet holding one document page.
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::WHITE)),
        text_color: Some(palette::GRAY_900),
        border: Border {
            color: palette::GRAY_200,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::SM,
        ..Default::default()
    }
}

/// Area behind pages and images.
pub fn canvas_area(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.extended_palette().background.weak.color)),
        ..Default::default()
    }
}

/// Subtle banner for status notes and hints.
pub fn note(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette_ext.background.weak.color)),
        text_color: Some(palette_ext.secondary.base.text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Panel used for the error display.
pub fn error_panel(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette_ext.background.weak.color)),
        text_color: Some(theme.palette().text),
        border: Border {
            color: palette::ERROR_500,
            width: 1.0,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}
