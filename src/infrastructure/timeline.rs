// SPDX-License-Identifier: MPL-2.0
//! Clock-driven media element.
//!
//! [`TimelineElement`] advances a playback position with wall-clock time and
//! reports the same events a real decoder would. It carries the transport UI
//! when no decoding backend is plugged in. Durations are probed from WAV
//! headers; other formats report an unknown duration.

use crate::application::port::{EngineResult, MediaBackend, MediaElement};
use crate::domain::preview::{MediaEvent, MediaSource};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Bytes read from the start of a file when probing its header.
const PROBE_LIMIT: u64 = 64 * 1024;

/// Reads the duration in seconds from a RIFF/WAVE header.
///
/// Walks the chunk list for `fmt ` (byte rate) and `data` (payload size);
/// the payload itself does not need to be present in `header`.
#[must_use]
pub fn probe_wav_duration(header: &[u8]) -> Option<f64> {
    if header.len() < 12 || &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return None;
    }

    let read_u32 = |at: usize| -> Option<u32> {
        header
            .get(at..at + 4)
            .and_then(|bytes| bytes.try_into().ok())
            .map(u32::from_le_bytes)
    };

    let mut offset = 12;
    let mut byte_rate = None;
    while offset + 8 <= header.len() {
        let id = &header[offset..offset + 4];
        let size = read_u32(offset + 4)? as usize;
        let body = offset + 8;
        match id {
            b"fmt " => byte_rate = read_u32(body + 8),
            b"data" => {
                let rate = byte_rate.filter(|rate| *rate > 0)?;
                return Some(size as f64 / f64::from(rate));
            }
            _ => {}
        }
        // Chunks are word aligned.
        offset = body + size + (size & 1);
    }
    None
}

fn probe_file(path: &Path) -> EngineResult<Option<f64>> {
    let mut header = Vec::new();
    File::open(path)?
        .take(PROBE_LIMIT)
        .read_to_end(&mut header)?;
    Ok(probe_wav_duration(&header))
}

#[derive(Debug)]
pub struct TimelineElement {
    duration: Option<f64>,
    position: f64,
    playing: bool,
    rate: f64,
    volume: f32,
    muted: bool,
    last_tick: Option<Instant>,
    pending: Vec<MediaEvent>,
}

impl TimelineElement {
    /// Creates an element; metadata is reported on the first poll.
    #[must_use]
    pub fn new(duration: Option<f64>) -> Self {
        Self {
            duration,
            position: 0.0,
            playing: false,
            rate: 1.0,
            volume: 1.0,
            muted: false,
            last_tick: None,
            pending: vec![MediaEvent::LoadedMetadata {
                duration: duration.unwrap_or(f64::INFINITY),
            }],
        }
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn at_end(&self) -> bool {
        self.duration.is_some_and(|duration| self.position >= duration)
    }
}

impl MediaElement for TimelineElement {
    fn play(&mut self) -> EngineResult<()> {
        if self.playing {
            return Ok(());
        }
        if self.at_end() {
            self.position = 0.0;
        }
        self.playing = true;
        self.last_tick = None;
        self.pending.push(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.pending.push(MediaEvent::Pause);
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.position = match self.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
        self.last_tick = None;
        self.pending.push(MediaEvent::TimeUpdate(self.position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    fn poll_events(&mut self, now: Instant) -> Vec<MediaEvent> {
        if self.playing {
            if let Some(last) = self.last_tick {
                let elapsed = now.saturating_duration_since(last).as_secs_f64();
                self.position += elapsed * self.rate;
                match self.duration {
                    Some(duration) if self.position >= duration => {
                        self.position = duration;
                        self.playing = false;
                        self.pending.push(MediaEvent::TimeUpdate(duration));
                        self.pending.push(MediaEvent::Ended);
                    }
                    _ => self.pending.push(MediaEvent::TimeUpdate(self.position)),
                }
            }
            self.last_tick = Some(now);
        }
        std::mem::take(&mut self.pending)
    }
}

/// Opens a [`TimelineElement`] for each media source.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimelineBackend;

impl MediaBackend for TimelineBackend {
    fn open(&self, source: &MediaSource) -> EngineResult<Box<dyn MediaElement>> {
        let duration = probe_file(&source.path)?;
        log::debug!(
            "Opened timeline for {} (duration {:?})",
            source.path.display(),
            duration
        );
        Ok(Box::new(TimelineElement::new(duration)))
    }
}
