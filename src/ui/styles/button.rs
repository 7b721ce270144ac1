// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Selected chip or primary action.
pub fn selected(theme: &Theme, status: button::Status) -> button::Style {
    let base = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        button::Status::Disabled => {
            return button::Style {
                background: Some(Background::Color(if theme.extended_palette().is_dark {
                    palette::GRAY_700
                } else {
                    palette::GRAY_200
                })),
                text_color: palette::GRAY_400,
                border: Border {
                    color: palette::GRAY_400,
                    width: 1.0,
                    radius: radius::SM.into(),
                },
                shadow: shadow::NONE,
                snap: true,
            }
        }
        button::Status::Active | button::Status::Pressed => palette::PRIMARY_500,
    };

    button::Style {
        background: Some(Background::Color(base)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_600,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::SM,
        snap: true,
    }
}

/// Unselected chip in a toggle group.
pub fn unselected(theme: &Theme, status: button::Status) -> button::Style {
    let mut style = button::secondary(theme, status);
    style.border.radius = radius::SM.into();
    style
}

/// Filled color swatch; `active` draws a brand outline.
pub fn swatch(color: Color, active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let outline = if active || matches!(status, button::Status::Hovered) {
            palette::PRIMARY_500
        } else {
            theme.extended_palette().background.strong.color
        };
        button::Style {
            background: Some(Background::Color(color)),
            text_color: WHITE,
            border: Border {
                color: outline,
                width: if active { 2.0 } else { 1.0 },
                radius: radius::FULL.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}

/// Preset row; highlighted when it matches the active palette.
pub fn preset(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let palette_ext = theme.extended_palette();
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => palette_ext.background.weak.color,
            _ => palette_ext.background.base.color,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: palette_ext.background.base.text,
            border: Border {
                color: if active {
                    palette::PRIMARY_500
                } else {
                    palette_ext.background.strong.color
                },
                width: if active { 2.0 } else { 1.0 },
                radius: radius::MD.into(),
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}
