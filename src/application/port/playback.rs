// SPDX-License-Identifier: MPL-2.0
//! Media playback port definition.
//!
//! A [`MediaElement`] is the playback engine behind the audio and video
//! previews. Commands are fire-and-forget; the element reports what actually
//! happened through [`MediaEvent`]s that the transport state mirrors.

use super::document::EngineResult;
use crate::domain::preview::{MediaEvent, MediaSource};
use std::time::Instant;

/// A playback element bound to one media source.
pub trait MediaElement: Send {
    /// Starts or resumes playback.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`](crate::error::EngineError) if playback
    /// cannot start.
    fn play(&mut self) -> EngineResult<()>;

    fn pause(&mut self);

    /// Jumps to `seconds`; callers pass an already clamped value.
    fn seek(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    fn set_rate(&mut self, rate: f64);

    /// Advances the element to `now` and drains its pending events.
    fn poll_events(&mut self, now: Instant) -> Vec<MediaEvent>;
}

/// Opens playback elements for media sources.
pub trait MediaBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`EngineError`](crate::error::EngineError) if the source
    /// cannot be opened.
    fn open(&self, source: &MediaSource) -> EngineResult<Box<dyn MediaElement>>;
}
