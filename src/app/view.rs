// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The home screen is always drawn; the preview modal and the cursor effects
//! dialog are stacked above it on a dimmed backdrop that swallows input.

use super::Message;
use crate::config::Config;
use crate::domain::preview::FileCategory;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use crate::ui::{cursor_effects, preview};
use iced::widget::{button, mouse_area, opaque, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length, Theme};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub theme: Theme,
    pub config: &'a Config,
    pub preview: &'a preview::State,
    pub cursor_settings: &'a cursor_effects::State,
    pub show_cursor_settings: bool,
    pub category: Option<FileCategory>,
    pub notice: Option<&'a str>,
}

/// Renders the home screen with any open modal on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(home(&ctx));

    if ctx.preview.is_open() {
        let content = ctx.preview.view(ctx.i18n, &ctx.theme).map(Message::Preview);
        stack = stack.push(modal(content, ctx.preview.is_fullscreen()));
    }

    if ctx.show_cursor_settings {
        let content = ctx
            .cursor_settings
            .view(cursor_effects::ViewContext {
                i18n: ctx.i18n,
                config: &ctx.config.cursor_effects,
            })
            .map(Message::CursorEffects);
        stack = stack.push(modal(content, false));
    }

    stack.into()
}

/// Centers `content` on a backdrop. Fullscreen content covers the window.
fn modal(content: Element<'_, Message>, fullscreen: bool) -> Element<'_, Message> {
    let padding = if fullscreen { 0.0 } else { spacing::LG };
    let backdrop = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(padding)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(container_styles::backdrop);

    opaque(mouse_area(backdrop))
}

fn home<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let title = Text::new(i18n.tr("home-title")).size(typography::TITLE_MD);
    let hint = Text::new(i18n.tr("home-drop-hint")).size(typography::BODY);

    let open = button(Text::new(i18n.tr("home-open-file")))
        .on_press(Message::OpenFileDialog)
        .style(button_styles::selected);
    let cursor = button(Text::new(i18n.tr("home-cursor-settings")))
        .on_press(Message::OpenCursorSettings)
        .style(button_styles::unselected);

    let mut column = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(hint)
        .push(category_selector(i18n, ctx.category))
        .push(Row::new().spacing(spacing::XS).push(open).push(cursor));

    if let Some(key) = ctx.notice {
        let notice = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(Text::new(i18n.tr(key)).size(typography::CAPTION))
            .push(
                button(Text::new(i18n.tr("home-dismiss")).size(typography::CAPTION))
                    .on_press(Message::DismissNotice)
                    .style(button_styles::unselected),
            );
        column = column.push(
            Container::new(notice)
                .padding([spacing::XXS, spacing::XS])
                .style(container_styles::note),
        );
    }

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn category_selector<'a>(i18n: &I18n, selected: Option<FileCategory>) -> Element<'a, Message> {
    let choice = |label: String, value: Option<FileCategory>| {
        let style = if selected == value {
            button_styles::selected
        } else {
            button_styles::unselected
        };
        button(Text::new(label).size(typography::CAPTION))
            .on_press(Message::CategorySelected(value))
            .style(style)
    };

    let mut row = Row::new()
        .spacing(spacing::XXS)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("home-category")).size(typography::CAPTION))
        .push(choice(i18n.tr("file-category-auto"), None));
    for category in FileCategory::ALL {
        row = row.push(choice(i18n.tr(category.i18n_key()), Some(category)));
    }
    row.into()
}
