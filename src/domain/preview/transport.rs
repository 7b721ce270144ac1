// SPDX-License-Identifier: MPL-2.0
//! Media transport state: position, volume, mute and playback rate.
//!
//! The state mirrors what the playback element reports through
//! [`MediaEvent`]s; commands compute their target values here and the
//! caller forwards them to the element.

use crate::config::{
    DEFAULT_PLAYBACK_RATE, DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME, PLAYBACK_RATES, VOLUME_STEP,
};

// =============================================================================
// Volume
// =============================================================================

/// Volume level, guaranteed to be within valid range (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Increases volume by one step, clamping to maximum.
    #[must_use]
    pub fn increase(self) -> Self {
        Self::new(((self.0 + VOLUME_STEP) * 100.0).round() / 100.0)
    }

    /// Decreases volume by one step, clamping to minimum.
    #[must_use]
    pub fn decrease(self) -> Self {
        Self::new(((self.0 - VOLUME_STEP) * 100.0).round() / 100.0)
    }

    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 <= MIN_VOLUME
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// One of the discrete playback rates in [`PLAYBACK_RATES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Snaps `rate` to the nearest supported preset.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        let nearest = PLAYBACK_RATES
            .iter()
            .copied()
            .min_by(|a, b| (a - rate).abs().total_cmp(&(b - rate).abs()))
            .unwrap_or(DEFAULT_PLAYBACK_RATE);
        Self(nearest)
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// All selectable rates.
    pub fn presets() -> impl Iterator<Item = PlaybackRate> {
        PLAYBACK_RATES.iter().copied().map(PlaybackRate)
    }

    /// Label such as `1.25×`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}×", self.0)
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_RATE)
    }
}

impl std::fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

// =============================================================================
// Events and state
// =============================================================================

/// Notifications emitted by a playback element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaEvent {
    TimeUpdate(f64),
    LoadedMetadata { duration: f64 },
    Ended,
    Play,
    Pause,
}

/// Transport state mirrored from the playback element.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportState {
    playing: bool,
    ended: bool,
    position: f64,
    duration: Option<f64>,
    volume: Volume,
    muted: bool,
    volume_before_mute: Volume,
    rate: PlaybackRate,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            playing: false,
            ended: false,
            position: 0.0,
            duration: None,
            volume: Volume::default(),
            muted: false,
            volume_before_mute: Volume::default(),
            rate: PlaybackRate::default(),
        }
    }
}

impl TransportState {
    /// Starts from persisted volume preferences.
    #[must_use]
    pub fn with_preferences(volume: Volume, muted: bool) -> Self {
        Self {
            volume,
            muted,
            volume_before_mute: volume,
            ..Self::default()
        }
    }

    /// Mirrors an element event.
    pub fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate(position) => {
                self.position = self.clamp_position(position);
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
                self.position = self.clamp_position(self.position);
            }
            MediaEvent::Ended => {
                self.playing = false;
                self.ended = true;
                if let Some(duration) = self.duration {
                    self.position = duration;
                }
            }
            MediaEvent::Play => {
                self.playing = true;
                self.ended = false;
            }
            MediaEvent::Pause => self.playing = false,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Clamps an absolute seek target to `[0, duration]`.
    #[must_use]
    pub fn seek_target(&self, seconds: f64) -> f64 {
        self.clamp_position(seconds)
    }

    /// Target of a relative skip from the current position.
    #[must_use]
    pub fn skip_target(&self, delta: f64) -> f64 {
        self.clamp_position(self.position + delta)
    }

    /// Records a seek the element accepted.
    pub fn seeked(&mut self, seconds: f64) {
        self.position = self.clamp_position(seconds);
        if self.duration.is_some_and(|d| self.position < d) {
            self.ended = false;
        }
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        let seconds = if seconds.is_finite() { seconds } else { 0.0 };
        match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        }
    }

    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Volume actually sent to the element.
    #[must_use]
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume.value()
        }
    }

    /// Sets the volume; moving the slider while muted unmutes.
    pub fn set_volume(&mut self, volume: Volume) {
        self.volume = volume;
        self.muted = false;
    }

    /// Toggles mute, remembering the volume to restore on unmute.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            self.volume = self.volume_before_mute;
        } else {
            self.volume_before_mute = self.volume;
            self.muted = true;
        }
    }

    #[must_use]
    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    pub fn set_rate(&mut self, rate: PlaybackRate) {
        self.rate = rate;
    }

    /// Fraction of the timeline already played, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.position / duration).clamp(0.0, 1.0) as f32,
            _ => 0.0,
        }
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past one hour.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn loaded(duration: f64) -> TransportState {
        let mut state = TransportState::default();
        state.apply(MediaEvent::LoadedMetadata { duration });
        state
    }

    #[test]
    fn volume_is_clamped() {
        assert_abs_diff_eq!(Volume::new(1.7).value(), 1.0);
        assert_abs_diff_eq!(Volume::new(-0.2).value(), 0.0);
        assert_abs_diff_eq!(Volume::new(f32::NAN).value(), 0.0);
        assert_abs_diff_eq!(Volume::new(0.95).increase().value(), 1.0);
        assert_abs_diff_eq!(Volume::new(0.5).decrease().value(), 0.4);
    }

    #[test]
    fn mute_then_unmute_restores_volume() {
        let mut state = TransportState::default();
        state.set_volume(Volume::new(0.6));
        state.toggle_mute();
        assert!(state.is_muted());
        assert_abs_diff_eq!(state.effective_volume(), 0.0);
        state.toggle_mute();
        assert!(!state.is_muted());
        assert_abs_diff_eq!(state.volume().value(), 0.6);
        assert_abs_diff_eq!(state.effective_volume(), 0.6);
    }

    #[test]
    fn changing_volume_while_muted_unmutes() {
        let mut state = TransportState::with_preferences(Volume::new(0.3), true);
        state.set_volume(Volume::new(0.8));
        assert!(!state.is_muted());
        assert_abs_diff_eq!(state.effective_volume(), 0.8);
    }

    #[test]
    fn seek_beyond_duration_clamps() {
        let state = loaded(120.0);
        assert_abs_diff_eq!(state.seek_target(500.0), 120.0);
        assert_abs_diff_eq!(state.seek_target(-4.0), 0.0);
    }

    #[test]
    fn skips_are_relative_and_clamped() {
        let mut state = loaded(60.0);
        state.apply(MediaEvent::TimeUpdate(55.0));
        assert_abs_diff_eq!(state.skip_target(10.0), 60.0);
        assert_abs_diff_eq!(state.skip_target(-30.0), 25.0);
        state.apply(MediaEvent::TimeUpdate(3.0));
        assert_abs_diff_eq!(state.skip_target(-10.0), 0.0);
    }

    #[test]
    fn events_drive_play_state() {
        let mut state = loaded(10.0);
        state.apply(MediaEvent::Play);
        assert!(state.is_playing());
        state.apply(MediaEvent::Ended);
        assert!(!state.is_playing());
        assert!(state.has_ended());
        assert_abs_diff_eq!(state.position(), 10.0);
        state.seeked(2.0);
        assert!(!state.has_ended());
    }

    #[test]
    fn invalid_duration_is_unknown() {
        let state = loaded(f64::INFINITY);
        assert_eq!(state.duration(), None);
        assert_abs_diff_eq!(state.progress(), 0.0);
    }

    #[test]
    fn playback_rate_snaps_to_presets() {
        assert_abs_diff_eq!(PlaybackRate::new(1.3).value(), 1.25);
        assert_abs_diff_eq!(PlaybackRate::new(9.0).value(), 2.0);
        assert_abs_diff_eq!(PlaybackRate::new(0.1).value(), 0.5);
        assert_eq!(PlaybackRate::presets().count(), 6);
    }

    #[test]
    fn format_time_handles_hours() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(75.9), "1:15");
        assert_eq!(format_time(3725.0), "1:02:05");
        assert_eq!(format_time(f64::NAN), "0:00");
    }
}
