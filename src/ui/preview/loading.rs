// SPDX-License-Identifier: MPL-2.0
//! Loading indicator with a slow-load hint.

use crate::config::defaults::LOADING_SLOW_HINT;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles::container as container_styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{Column, Container, Text};
use iced::{alignment, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct State {
    started_at: Option<Instant>,
    spinner_rotation: f32,
    slow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The load crossed the slow threshold on this tick.
    BecameSlow,
}

impl State {
    pub fn start(&mut self, now: Instant) {
        *self = Self {
            started_at: Some(now),
            ..Self::default()
        };
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    /// Advances the spinner and checks the watchdog.
    pub fn tick(&mut self, now: Instant) -> Effect {
        let Some(started) = self.started_at else {
            return Effect::None;
        };
        self.spinner_rotation = (self.spinner_rotation + SPINNER_SPEED) % std::f32::consts::TAU;
        if !self.slow && now.saturating_duration_since(started) >= LOADING_SLOW_HINT {
            self.slow = true;
            return Effect::BecameSlow;
        }
        Effect::None
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.started_at.is_some()
    }

    #[must_use]
    pub fn is_slow(&self) -> bool {
        self.slow
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.started_at
            .map_or(Duration::ZERO, |started| now.saturating_duration_since(started))
    }

    pub fn view<'a, Message: 'static>(&self, i18n: &I18n, theme: &Theme) -> Element<'a, Message> {
        let spinner =
            AnimatedSpinner::new(theme.extended_palette().primary.base.color, self.spinner_rotation)
                .into_element();

        let mut column = Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(spinner)
            .push(Text::new(i18n.tr("preview-loading")).size(typography::BODY));

        if self.slow {
            column = column.push(
                Container::new(Text::new(i18n.tr("preview-loading-slow")).size(typography::CAPTION))
                    .padding(spacing::XS)
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
}
