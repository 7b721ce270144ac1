// SPDX-License-Identifier: MPL-2.0
//! Media transport: a playback element plus the controls driving it.
//!
//! Commands go straight to the [`MediaElement`]; the displayed state only
//! changes when the element reports an event, except for seeks, volume and
//! rate which the element applies synchronously.

use crate::application::port::MediaElement;
use crate::config::{LONG_SKIP_SECS, SHORT_SKIP_SECS};
use crate::domain::preview::transport::format_time;
use crate::domain::preview::{MediaEvent, MediaKind, PlaybackRate, TransportState, Volume};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use fluent_bundle::FluentValue;
use iced::widget::{button, pick_list, slider, tooltip, Column, Container, Row, Space, Text};
use iced::{alignment, Background, Element, Length};
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    TogglePlay,
    /// Slider dragged; committed on release.
    SeekPreview(f64),
    SeekCommit,
    Skip(f64),
    /// Volume slider dragged; remembered on release.
    VolumeChanged(f32),
    VolumeCommit,
    VolumeStep(bool),
    ToggleMute,
    RateSelected(PlaybackRate),
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Volume or mute changed and should be remembered.
    PreferencesChanged,
    ToggleFullscreen,
}

pub struct Player {
    element: Box<dyn MediaElement>,
    kind: MediaKind,
    state: TransportState,
    seek_preview: Option<f64>,
    metadata_loaded: bool,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("seek_preview", &self.seek_preview)
            .field("metadata_loaded", &self.metadata_loaded)
            .finish_non_exhaustive()
    }
}

impl Player {
    /// Binds `element`, applying the remembered volume and mute first.
    ///
    /// Events the element queued on open (metadata) are drained before
    /// returning so seeks and skips clamp to the duration without playback.
    pub fn new(
        mut element: Box<dyn MediaElement>,
        kind: MediaKind,
        volume: Volume,
        muted: bool,
        autoplay: bool,
    ) -> Self {
        let state = TransportState::with_preferences(volume, muted);
        element.set_volume(state.volume().value());
        element.set_muted(state.is_muted());
        let mut player = Self {
            element,
            kind,
            state,
            seek_preview: None,
            metadata_loaded: false,
        };
        if autoplay {
            player.play();
        }
        player.tick(Instant::now());
        player
    }

    #[must_use]
    pub fn state(&self) -> &TransportState {
        &self.state
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Whether the element needs clock ticks to report progress or
    /// still owes its metadata.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.state.is_playing() || !self.metadata_loaded
    }

    /// Drains element events up to `now`.
    pub fn tick(&mut self, now: Instant) {
        for event in self.element.poll_events(now) {
            if matches!(event, MediaEvent::LoadedMetadata { .. }) {
                self.metadata_loaded = true;
            }
            self.state.apply(event);
        }
    }

    fn play(&mut self) {
        if let Err(err) = self.element.play() {
            log::warn!("Playback could not start: {}", err);
        }
    }

    fn seek(&mut self, seconds: f64) {
        let target = self.state.seek_target(seconds);
        self.element.seek(target);
        self.state.seeked(target);
    }

    fn sync_volume(&mut self) {
        self.element.set_volume(self.state.volume().value());
        self.element.set_muted(self.state.is_muted());
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::TogglePlay => {
                if self.state.is_playing() {
                    self.element.pause();
                } else {
                    self.play();
                }
                // Pick up the Play/Pause acknowledgement right away.
                self.tick(Instant::now());
                Effect::None
            }
            Message::SeekPreview(seconds) => {
                self.seek_preview = Some(self.state.seek_target(seconds));
                Effect::None
            }
            Message::SeekCommit => {
                if let Some(target) = self.seek_preview.take() {
                    self.seek(target);
                }
                Effect::None
            }
            Message::Skip(delta) => {
                self.seek(self.state.skip_target(delta));
                Effect::None
            }
            Message::VolumeChanged(volume) => {
                self.state.set_volume(Volume::new(volume));
                self.sync_volume();
                Effect::None
            }
            Message::VolumeCommit => Effect::PreferencesChanged,
            Message::VolumeStep(up) => {
                let current = self.state.volume();
                self.state
                    .set_volume(if up { current.increase() } else { current.decrease() });
                self.sync_volume();
                Effect::PreferencesChanged
            }
            Message::ToggleMute => {
                self.state.toggle_mute();
                self.sync_volume();
                Effect::PreferencesChanged
            }
            Message::RateSelected(rate) => {
                self.state.set_rate(rate);
                self.element.set_rate(rate.value());
                Effect::None
            }
            Message::ToggleFullscreen if self.kind == MediaKind::Video => Effect::ToggleFullscreen,
            Message::ToggleFullscreen => Effect::None,
        }
    }

    pub fn view<'a>(&'a self, i18n: &I18n, file_name: &'a str) -> Element<'a, Message> {
        let surface = Container::new(
            Column::new()
                .spacing(spacing::XS)
                .align_x(alignment::Horizontal::Center)
                .push(Text::new(file_name).size(typography::TITLE_SM))
                .push(
                    Text::new(format_time(self.state.position())).size(typography::TITLE_MD),
                ),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(move |theme: &iced::Theme| {
            let mut style = container_styles::canvas_area(theme);
            if self.kind == MediaKind::Video {
                style.background = Some(Background::Color(palette::BLACK));
                style.text_color = Some(palette::WHITE);
            }
            style
        });

        Column::new()
            .spacing(spacing::SM)
            .push(surface)
            .push(self.seek_bar())
            .push(self.controls(i18n))
            .into()
    }

    fn seek_bar(&self) -> Element<'_, Message> {
        let duration = self.state.duration().unwrap_or(0.0);
        let position = self.seek_preview.unwrap_or(self.state.position());

        let bar: Element<'_, Message> = if duration > 0.0 {
            slider(0.0..=duration, position, Message::SeekPreview)
                .on_release(Message::SeekCommit)
                .step(0.1)
                .into()
        } else {
            slider(0.0..=1.0, 0.0, |_| Message::SeekCommit).into()
        };

        let duration_label = self
            .state
            .duration()
            .map_or_else(|| "--:--".to_string(), format_time);

        Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center)
            .push(Text::new(format_time(position)).size(typography::CAPTION))
            .push(bar)
            .push(Text::new(duration_label).size(typography::CAPTION))
            .into()
    }

    fn controls(&self, i18n: &I18n) -> Element<'_, Message> {
        let play_label = if self.state.is_playing() {
            i18n.tr("preview-pause")
        } else {
            i18n.tr("preview-play")
        };

        let mut row = Row::new()
            .spacing(spacing::XS)
            .align_y(alignment::Vertical::Center);

        if self.kind == MediaKind::Audio {
            row = row.push(skip_button(i18n, -LONG_SKIP_SECS));
        }
        row = row
            .push(skip_button(i18n, -SHORT_SKIP_SECS))
            .push(
                button(Text::new(play_label))
                    .on_press(Message::TogglePlay)
                    .height(Length::Fixed(sizing::BUTTON_HEIGHT))
                    .style(button_styles::selected),
            )
            .push(skip_button(i18n, SHORT_SKIP_SECS));
        if self.kind == MediaKind::Audio {
            row = row.push(skip_button(i18n, LONG_SKIP_SECS));
        }

        let mute_label = if self.state.is_muted() {
            i18n.tr("preview-unmute")
        } else {
            i18n.tr("preview-mute")
        };
        let volume = if self.state.is_muted() {
            0.0
        } else {
            self.state.volume().value()
        };

        row = row
            .push(Space::new().width(Length::Fill))
            .push(
                button(Text::new(mute_label).size(typography::CAPTION))
                    .on_press(Message::ToggleMute)
                    .style(button_styles::unselected),
            )
            .push(
                slider(0.0..=1.0, volume, Message::VolumeChanged)
                    .on_release(Message::VolumeCommit)
                    .step(0.05)
                    .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH)),
            )
            .push(
                tooltip(
                    pick_list(
                        PlaybackRate::presets().collect::<Vec<_>>(),
                        Some(self.state.rate()),
                        Message::RateSelected,
                    )
                    .text_size(typography::CAPTION),
                    Text::new(i18n.tr("preview-speed")),
                    tooltip::Position::Top,
                )
                .gap(4),
            );

        if self.kind == MediaKind::Video {
            row = row.push(
                button(Text::new(i18n.tr("preview-fullscreen")).size(typography::CAPTION))
                    .on_press(Message::ToggleFullscreen)
                    .style(button_styles::unselected),
            );
        }

        row.into()
    }
}

fn skip_button<'a>(i18n: &I18n, delta: f64) -> Element<'a, Message> {
    let key = if delta < 0.0 {
        "preview-skip-back"
    } else {
        "preview-skip-forward"
    };
    let label = i18n.tr_with_args(key, &[("seconds", FluentValue::from(delta.abs()))]);
    button(Text::new(label).size(typography::CAPTION))
        .on_press(Message::Skip(delta))
        .style(button_styles::unselected)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::test_utils::assert_abs_diff_eq;
    use std::sync::{Arc, Mutex};

    /// Records commands; reports play/pause immediately.
    #[derive(Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
        pending: Vec<MediaEvent>,
        fail_play: bool,
    }

    impl MediaElement for Recorder {
        fn play(&mut self) -> crate::application::port::EngineResult<()> {
            if self.fail_play {
                return Err(EngineError::new("blocked"));
            }
            self.record("play".into());
            self.pending.push(MediaEvent::Play);
            Ok(())
        }

        fn pause(&mut self) {
            self.record("pause".into());
            self.pending.push(MediaEvent::Pause);
        }

        fn seek(&mut self, seconds: f64) {
            self.record(format!("seek {seconds}"));
        }

        fn set_volume(&mut self, volume: f32) {
            self.record(format!("volume {volume}"));
        }

        fn set_muted(&mut self, muted: bool) {
            self.record(format!("muted {muted}"));
        }

        fn set_rate(&mut self, rate: f64) {
            self.record(format!("rate {rate}"));
        }

        fn poll_events(&mut self, _now: Instant) -> Vec<MediaEvent> {
            std::mem::take(&mut self.pending)
        }
    }

    impl Recorder {
        fn record(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }
    }

    fn player(kind: MediaKind, duration: f64) -> (Player, Arc<Mutex<Vec<String>>>) {
        let recorder = Recorder {
            pending: vec![MediaEvent::LoadedMetadata { duration }],
            ..Recorder::default()
        };
        let calls = Arc::clone(&recorder.calls);
        let player = Player::new(Box::new(recorder), kind, Volume::new(0.6), false, false);
        (player, calls)
    }

    #[test]
    fn preferences_are_applied_on_open() {
        let (_player, calls) = player(MediaKind::Audio, 60.0);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["volume 0.6", "muted false"]);
    }

    #[test]
    fn toggle_play_follows_element_events() {
        let (mut player, _) = player(MediaKind::Audio, 60.0);
        player.update(Message::TogglePlay);
        assert!(player.state().is_playing());
        assert!(player.needs_ticks());
        player.update(Message::TogglePlay);
        assert!(!player.state().is_playing());
    }

    #[test]
    fn failed_play_stays_paused() {
        let recorder = Recorder {
            fail_play: true,
            ..Recorder::default()
        };
        let mut player = Player::new(Box::new(recorder), MediaKind::Video, Volume::default(), false, true);
        player.update(Message::TogglePlay);
        assert!(!player.state().is_playing());
    }

    #[test]
    fn seek_beyond_duration_clamps() {
        let (mut player, calls) = player(MediaKind::Video, 42.0);
        player.update(Message::SeekPreview(100.0));
        player.update(Message::SeekCommit);
        assert_abs_diff_eq!(player.state().position(), 42.0);
        assert!(calls.lock().unwrap().contains(&"seek 42".to_string()));
    }

    #[test]
    fn duration_is_known_before_playback_starts() {
        let (mut player, _) = player(MediaKind::Audio, 60.0);
        assert_eq!(player.state().duration(), Some(60.0));
        assert!(!player.state().is_playing());
        assert!(!player.needs_ticks());

        for _ in 0..9 {
            player.update(Message::Skip(SHORT_SKIP_SECS));
        }
        assert_abs_diff_eq!(player.state().position(), 60.0);
    }

    #[test]
    fn ticks_until_late_metadata_arrives() {
        let mut player = Player::new(
            Box::new(Recorder::default()),
            MediaKind::Video,
            Volume::default(),
            false,
            false,
        );
        assert!(player.needs_ticks());
        assert_eq!(player.state().duration(), None);
        player.tick(Instant::now());
        assert!(player.needs_ticks());
    }

    #[test]
    fn skips_clamp_at_both_ends() {
        let (mut player, _) = player(MediaKind::Audio, 25.0);
        player.update(Message::Skip(-SHORT_SKIP_SECS));
        assert_abs_diff_eq!(player.state().position(), 0.0);
        player.update(Message::Skip(LONG_SKIP_SECS));
        assert_abs_diff_eq!(player.state().position(), 25.0);
    }

    #[test]
    fn mute_then_unmute_restores_volume() {
        let (mut player, _) = player(MediaKind::Audio, 10.0);
        assert_eq!(player.update(Message::ToggleMute), Effect::PreferencesChanged);
        assert!(player.state().is_muted());
        player.update(Message::ToggleMute);
        assert!(!player.state().is_muted());
        assert_abs_diff_eq!(player.state().volume().value(), 0.6);
    }

    #[test]
    fn volume_steps_and_rate_reach_the_element() {
        let (mut player, calls) = player(MediaKind::Audio, 10.0);
        player.update(Message::VolumeStep(false));
        assert_abs_diff_eq!(player.state().volume().value(), 0.5);
        player.update(Message::RateSelected(PlaybackRate::new(1.5)));
        assert!(calls.lock().unwrap().contains(&"rate 1.5".to_string()));
    }

    #[test]
    fn volume_drag_is_remembered_only_on_release() {
        let (mut player, calls) = player(MediaKind::Audio, 10.0);
        for volume in [0.5, 0.4, 0.3] {
            assert_eq!(player.update(Message::VolumeChanged(volume)), Effect::None);
        }
        assert!(calls.lock().unwrap().contains(&"volume 0.3".to_string()));
        assert_eq!(player.update(Message::VolumeCommit), Effect::PreferencesChanged);
        assert_abs_diff_eq!(player.state().volume().value(), 0.3);
    }

    #[test]
    fn fullscreen_only_for_video() {
        let (mut audio, _) = player(MediaKind::Audio, 10.0);
        assert_eq!(audio.update(Message::ToggleFullscreen), Effect::None);
        let (mut video, _) = player(MediaKind::Video, 10.0);
        assert_eq!(video.update(Message::ToggleFullscreen), Effect::ToggleFullscreen);
    }
}
