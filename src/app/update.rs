// SPDX-License-Identifier: MPL-2.0
//! Update handlers that turn component events into application side effects.

use super::{persistence, Message};
use crate::application::preview::file::dialog_extensions;
use crate::config::Config;
use crate::domain::preview::FileCategory;
use crate::ui::{cursor_effects, preview};
use iced::{window, Task};

/// Routes a cursor effects dialog message and applies the resulting event to
/// the owned configuration.
pub fn handle_cursor_effects_message(
    state: &mut cursor_effects::State,
    config: &mut Config,
    visible: &mut bool,
    message: cursor_effects::Message,
) {
    let Some(event) = state.update(message, &config.cursor_effects) else {
        return;
    };

    let effects = &mut config.cursor_effects;
    match event {
        cursor_effects::Event::Close => {
            *visible = false;
            return;
        }
        cursor_effects::Event::EnabledChanged(enabled) => effects.enabled = enabled,
        cursor_effects::Event::EffectsChanged(set) => effects.effects = set,
        cursor_effects::Event::IntensityChanged(intensity) => effects.intensity = intensity,
        cursor_effects::Event::ColorsChanged(colors) => effects.colors = colors,
        cursor_effects::Event::CustomColorsChanged(colors) => effects.custom_colors = colors,
    }
    log::debug!("Cursor effects updated: {:?}", config.cursor_effects);
    persistence::persist(config);
}

/// Applies a preview effect: window mode changes and preference persistence.
pub fn apply_preview_effect(
    effect: preview::Effect,
    config: &mut Config,
    window_id: Option<&window::Id>,
    fullscreen: bool,
) -> Task<Message> {
    match effect {
        preview::Effect::None => Task::none(),
        preview::Effect::Close { exit_fullscreen } => {
            if exit_fullscreen {
                set_window_mode(window_id, false)
            } else {
                Task::none()
            }
        }
        // `fullscreen` is the component's flag after the toggle.
        preview::Effect::ToggleFullscreen => set_window_mode(window_id, fullscreen),
        preview::Effect::ExitFullscreen => set_window_mode(window_id, false),
        preview::Effect::PersistPreferences(preferences) => {
            persistence::apply_preferences(config, preferences);
            persistence::persist(config);
            Task::none()
        }
    }
}

/// Switches the main window between fullscreen and windowed mode.
pub fn set_window_mode(window_id: Option<&window::Id>, fullscreen: bool) -> Task<Message> {
    let Some(window_id) = window_id else {
        return Task::none();
    };

    let mode = if fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::set_mode(*window_id, mode)
}

/// Handles the open file dialog request from the home screen.
///
/// Without a selected category every supported type gets its own filter.
pub fn handle_open_file_dialog(category: Option<FileCategory>) -> Task<Message> {
    Task::perform(
        async move {
            let categories = match category {
                Some(category) => vec![category],
                None => FileCategory::ALL.to_vec(),
            };
            let mut dialog = rfd::AsyncFileDialog::new();
            for category in categories {
                dialog = dialog.add_filter(format!("{category:?}"), dialog_extensions(category));
            }
            dialog.pick_file().await.map(|handle| handle.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}
