// SPDX-License-Identifier: MPL-2.0
//! Error panel with collapsible details and a retry action.

use crate::error::PreviewError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use iced::widget::{button, rule, text, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Error shown in place of the content. The message is stored as an i18n
/// key and translated at view time so a locale change is picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    friendly_key: &'static str,
    details: String,
    show_details: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ToggleDetails,
    Retry,
}

impl State {
    #[must_use]
    pub fn new(friendly_key: &'static str, details: String) -> Self {
        Self {
            friendly_key,
            details,
            show_details: false,
        }
    }

    #[must_use]
    pub fn from_error(error: &PreviewError) -> Self {
        Self::new(error.i18n_key(), error.detail())
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    #[must_use]
    pub fn friendly_key(&self) -> &'static str {
        self.friendly_key
    }

    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    #[must_use]
    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn view<'a>(&'a self, i18n: &I18n) -> Element<'a, Message> {
        let heading = Text::new(i18n.tr("preview-error-title"))
            .size(typography::TITLE_SM)
            .style(|_theme| text::Style {
                color: Some(palette::ERROR_500),
            });

        let mut column = Column::new()
            .spacing(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .push(heading)
            .push(Text::new(i18n.tr(self.friendly_key)).size(typography::BODY));

        let retry = button(Text::new(i18n.tr("preview-retry")))
            .on_press(Message::Retry)
            .style(button_styles::selected);
        let mut actions = Row::new().spacing(spacing::XS).push(retry);

        if !self.details.is_empty() {
            let label = if self.show_details {
                i18n.tr("preview-hide-details")
            } else {
                i18n.tr("preview-show-details")
            };
            actions = actions.push(
                button(Text::new(label))
                    .on_press(Message::ToggleDetails)
                    .style(button_styles::unselected),
            );
        }
        column = column.push(actions);

        if self.show_details && !self.details.is_empty() {
            column = column.push(rule::horizontal(1)).push(
                Column::new()
                    .spacing(spacing::XXS)
                    .width(Length::Fill)
                    .push(Text::new(i18n.tr("preview-details-heading")).size(typography::CAPTION))
                    .push(Text::new(self.details.as_str()).size(typography::CAPTION)),
            );
        }

        Container::new(
            Container::new(column)
                .padding(spacing::LG)
                .max_width(sizing::SETTINGS_DIALOG_WIDTH)
                .style(container_styles::error_panel),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_from_preview_error() {
        let state = State::from_error(&PreviewError::ReadFailure("denied".into()));
        assert_eq!(state.friendly_key(), "error-preview-read");
        assert!(state.details().contains("denied"));
        assert!(!state.show_details());
    }

    #[test]
    fn toggle_details_flips_visibility() {
        let mut state = State::new("error-preview-terminal", "all tiers failed".into());
        state.toggle_details();
        assert!(state.show_details());
        state.toggle_details();
        assert!(!state.show_details());
    }
}
