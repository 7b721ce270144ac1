// SPDX-License-Identifier: MPL-2.0
//! Configuration persistence logic.
//!
//! Writes the cursor effect settings and preview playback preferences back
//! to `settings.toml` whenever they change.

use crate::config::{self, Config};
use crate::ui::preview::Preferences;

/// Copies the playback preferences into the `[preview]` section.
pub fn apply_preferences(cfg: &mut Config, preferences: Preferences) {
    cfg.preview.volume = Some(preferences.volume.value());
    cfg.preview.muted = Some(preferences.muted);
    cfg.preview.autoplay = Some(preferences.autoplay);
}

/// Persists `cfg` to disk.
///
/// Guarded during tests to keep isolation: unit tests exercise the logic by
/// inspecting the in-memory config instead.
pub fn persist(cfg: &Config) {
    if cfg!(test) {
        return;
    }

    if let Err(error) = config::save(cfg) {
        log::error!("Failed to save config: {}", error);
    }
}
