// SPDX-License-Identifier: MPL-2.0
//! Cursor effects settings dialog.
//!
//! A controlled component: the parent owns the [`EffectConfiguration`] and
//! passes it into [`State::update`] and [`State::view`]. Every change is
//! reported upward as an [`Event`] carrying the complete new value of one
//! field, never a delta. The component itself only remembers the text typed
//! into the custom color field and the last validation error.

use crate::domain::cursor::{
    EffectConfiguration, EffectKind, HexColor, Intensity, PRESETS,
};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use iced::widget::{
    button, container, scrollable, text, text_input, toggler, Column, Container, Row, Space, Text,
};
use iced::{alignment, Color, Element, Length, Theme};

/// Transient input state.
#[derive(Debug, Clone, Default)]
pub struct State {
    color_input: String,
    input_error: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub enum Message {
    EnabledToggled(bool),
    EffectToggled(EffectKind),
    IntensitySelected(Intensity),
    PresetSelected(usize),
    ColorInputChanged(String),
    AddCustomColor,
    RemoveCustomColor(usize),
    UseCustomColor(usize),
    Close,
}

/// Complete new values reported to the owner of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    EnabledChanged(bool),
    EffectsChanged(crate::domain::cursor::EffectSet),
    IntensityChanged(Intensity),
    ColorsChanged(Vec<HexColor>),
    CustomColorsChanged(Vec<HexColor>),
    Close,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a EffectConfiguration,
}

impl State {
    #[must_use]
    pub fn color_input(&self) -> &str {
        &self.color_input
    }

    /// i18n key of the inline validation error, if any.
    #[must_use]
    pub fn input_error(&self) -> Option<&'static str> {
        self.input_error
    }

    pub fn update(&mut self, message: Message, config: &EffectConfiguration) -> Option<Event> {
        match message {
            Message::EnabledToggled(enabled) => Some(Event::EnabledChanged(enabled)),
            Message::EffectToggled(kind) => Some(Event::EffectsChanged(config.effects.toggled(kind))),
            Message::IntensitySelected(intensity) => Some(Event::IntensityChanged(intensity)),
            Message::PresetSelected(index) => PRESETS
                .get(index)
                .map(|preset| Event::ColorsChanged(preset.colors())),
            Message::ColorInputChanged(value) => {
                self.color_input = value;
                self.input_error = None;
                None
            }
            Message::AddCustomColor => match HexColor::parse(&self.color_input) {
                Ok(color) => {
                    self.color_input.clear();
                    self.input_error = None;
                    if config.custom_colors.contains(&color) {
                        None
                    } else {
                        Some(Event::CustomColorsChanged(config.custom_colors_with(color)))
                    }
                }
                Err(err) => {
                    self.input_error = Some(err.i18n_key());
                    None
                }
            },
            Message::RemoveCustomColor(index) => (index < config.custom_colors.len())
                .then(|| Event::CustomColorsChanged(config.custom_colors_without(index))),
            Message::UseCustomColor(index) => {
                let color = config.custom_colors.get(index)?.clone();
                (!config.colors.contains(&color))
                    .then(|| Event::ColorsChanged(config.colors_with(color)))
            }
            Message::Close => Some(Event::Close),
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;
        let config = ctx.config;

        let title = Text::new(i18n.tr("cursor-settings-title")).size(typography::TITLE_MD);

        let enabled = toggler(config.enabled)
            .label(i18n.tr("cursor-settings-enabled"))
            .on_toggle(Message::EnabledToggled);

        let mut content = Column::new()
            .spacing(spacing::MD)
            .push(title)
            .push(enabled)
            .push(section_title(i18n.tr("cursor-settings-effects")))
            .push(effect_chips(i18n, config))
            .push(section_title(i18n.tr("cursor-settings-intensity")))
            .push(intensity_chips(i18n, config))
            .push(section_title(i18n.tr("cursor-settings-presets")))
            .push(preset_list(i18n, config))
            .push(section_title(i18n.tr("cursor-settings-colors")))
            .push(swatch_row(&config.colors));

        content = content
            .push(section_title(i18n.tr("cursor-settings-custom-colors")))
            .push(self.custom_color_editor(i18n, config));

        let close = button(Text::new(i18n.tr("cursor-settings-close")))
            .on_press(Message::Close)
            .style(button_styles::selected);

        let body = Column::new()
            .spacing(spacing::MD)
            .push(scrollable(content.padding(spacing::XS)).height(Length::Fill))
            .push(
                Container::new(close)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Right),
            );

        Container::new(body)
            .width(Length::Fixed(sizing::SETTINGS_DIALOG_WIDTH))
            .height(Length::Fixed(sizing::PREVIEW_MODAL_HEIGHT))
            .padding(spacing::LG)
            .style(container_styles::dialog)
            .into()
    }

    fn custom_color_editor<'a>(
        &'a self,
        i18n: &'a I18n,
        config: &'a EffectConfiguration,
    ) -> Element<'a, Message> {
        let input = text_input(&i18n.tr("cursor-settings-custom-placeholder"), &self.color_input)
            .on_input(Message::ColorInputChanged)
            .on_submit(Message::AddCustomColor)
            .width(Length::Fixed(140.0));

        let add = button(Text::new(i18n.tr("cursor-settings-add-color")))
            .on_press(Message::AddCustomColor)
            .style(button_styles::unselected);

        let mut column = Column::new().spacing(spacing::XS).push(
            Row::new()
                .spacing(spacing::XS)
                .align_y(alignment::Vertical::Center)
                .push(input)
                .push(add),
        );

        if let Some(key) = self.input_error {
            column = column.push(
                Text::new(i18n.tr(key))
                    .size(typography::CAPTION)
                    .style(|theme: &Theme| text::Style {
                        color: Some(theme.extended_palette().danger.base.color),
                    }),
            );
        }

        if !config.custom_colors.is_empty() {
            let mut list = Column::new().spacing(spacing::XXS);
            for (index, color) in config.custom_colors.iter().enumerate() {
                let swatch = button(Space::new().width(Length::Fill).height(Length::Fill))
                    .width(Length::Fixed(sizing::SWATCH))
                    .height(Length::Fixed(sizing::SWATCH))
                    .on_press(Message::RemoveCustomColor(index))
                    .style(button_styles::swatch(to_color(color), false));
                let in_palette = config.colors.contains(color);
                let mut use_button = button(Text::new(i18n.tr("cursor-settings-use-color")).size(typography::CAPTION))
                    .style(button_styles::unselected);
                if !in_palette {
                    use_button = use_button.on_press(Message::UseCustomColor(index));
                }
                list = list.push(
                    Row::new()
                        .spacing(spacing::XS)
                        .align_y(alignment::Vertical::Center)
                        .push(swatch)
                        .push(Text::new(color.as_str()).size(typography::CAPTION))
                        .push(use_button),
                );
            }
            column = column.push(list).push(
                Text::new(i18n.tr("cursor-settings-remove-hint")).size(typography::CAPTION),
            );
        }

        column.into()
    }
}

fn section_title<'a>(label: String) -> Element<'a, Message> {
    Text::new(label).size(typography::TITLE_SM).into()
}

fn chip<'a>(label: String, selected: bool, message: Message) -> Element<'a, Message> {
    button(Text::new(label).size(typography::BODY))
        .on_press(message)
        .style(if selected {
            button_styles::selected
        } else {
            button_styles::unselected
        })
        .into()
}

fn effect_chips<'a>(i18n: &I18n, config: &EffectConfiguration) -> Element<'a, Message> {
    let chips = EffectKind::ALL.iter().map(|kind| {
        chip(
            i18n.tr(kind.i18n_key()),
            config.effects.contains(*kind),
            Message::EffectToggled(*kind),
        )
    });
    Row::with_children(chips).spacing(spacing::XS).wrap().into()
}

fn intensity_chips<'a>(i18n: &I18n, config: &EffectConfiguration) -> Element<'a, Message> {
    let chips = Intensity::ALL.iter().map(|intensity| {
        chip(
            i18n.tr(intensity.i18n_key()),
            config.intensity == *intensity,
            Message::IntensitySelected(*intensity),
        )
    });
    Row::with_children(chips).spacing(spacing::XS).into()
}

fn preset_list<'a>(i18n: &I18n, config: &EffectConfiguration) -> Element<'a, Message> {
    let active = config.active_preset().map(|preset| preset.name_key);
    let rows = PRESETS.iter().enumerate().map(|(index, preset)| {
        let is_active = active == Some(preset.name_key);
        let strip = swatch_row(&preset.colors());
        button(
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(Text::new(i18n.tr(preset.name_key)).width(Length::Fill))
                .push(container(strip).width(Length::Shrink)),
        )
        .width(Length::Fill)
        .padding(spacing::XS)
        .on_press(Message::PresetSelected(index))
        .style(button_styles::preset(is_active))
        .into()
    });
    Column::with_children(rows).spacing(spacing::XXS).into()
}

/// Read-only color strip; the swatches are not interactive.
fn swatch_row<'a>(colors: &[HexColor]) -> Element<'a, Message> {
    let swatches = colors.iter().map(|color| {
        button(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fixed(sizing::SWATCH / 1.5))
            .height(Length::Fixed(sizing::SWATCH / 1.5))
            .style(button_styles::swatch(to_color(color), false))
            .into()
    });
    Row::with_children(swatches).spacing(spacing::XXS).into()
}

fn to_color(color: &HexColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::from_rgb8(r, g, b)
}
