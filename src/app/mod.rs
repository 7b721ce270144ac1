// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the home screen, the
//! preview modal and the cursor effects dialog.
//!
//! The `App` struct wires together the components (preview, localization,
//! cursor settings) and translates their effects into side effects like
//! config persistence or window mode changes. Policy decisions (window size,
//! what gets persisted and when) stay close to the main update loop so
//! user-facing behavior is easy to audit.

pub mod config;
pub mod i18n;
mod message;
pub mod paths;
mod persistence;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::preview::{FileHandle, PreviewRequest};
use crate::domain::preview::{FileCategory, Volume};
use crate::infrastructure;
use crate::ui::theming::ThemeMode;
use crate::ui::{cursor_effects, preview};
use i18n::fluent::I18n;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: config::Config,
    preview: preview::State,
    cursor_settings: cursor_effects::State,
    show_cursor_settings: bool,
    /// Category for files opened from the home screen; `None` infers it
    /// from the MIME type.
    category: Option<FileCategory>,
    window_id: Option<window::Id>,
    theme_mode: ThemeMode,
    /// i18n key of a notice shown on the home screen.
    notice: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("preview_open", &self.preview.is_open())
            .field("show_cursor_settings", &self.show_cursor_settings)
            .field("category", &self.category)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const MIN_WINDOW_HEIGHT: u32 = 560;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Preview preferences stored in the `[preview]` config section.
fn preferences_from(config: &config::Config) -> preview::Preferences {
    let defaults = preview::Preferences::default();
    preview::Preferences {
        volume: config.preview.volume.map_or(defaults.volume, Volume::new),
        muted: config.preview.muted.unwrap_or(defaults.muted),
        autoplay: config.preview.autoplay.unwrap_or(defaults.autoplay),
    }
}

impl App {
    /// Initializes application state and optionally kicks off the preview
    /// of the file passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);
        let preview = preview::State::new(
            infrastructure::builtin_engines(),
            preferences_from(&config),
        );

        let mut app = App {
            i18n,
            theme_mode: config.general.theme_mode,
            config,
            preview,
            cursor_settings: cursor_effects::State::default(),
            show_cursor_settings: flags.cursor_settings,
            category: flags.file_type,
            window_id: None,
            notice: config_warning,
        };

        let task = match flags.file_path {
            Some(path) => app.open_path(PathBuf::from(path), flags.file_type),
            None => Task::none(),
        };

        (app, task)
    }

    /// Opens `path` in the preview modal. Without an explicit category the
    /// one implied by the file's MIME type is used.
    fn open_path(&mut self, path: PathBuf, category: Option<FileCategory>) -> Task<Message> {
        match FileHandle::from_path(&path) {
            Ok(file) => {
                let category = category.unwrap_or_else(|| file.inferred_category());
                self.notice = None;
                self.preview
                    .open(PreviewRequest::new(file, category))
                    .map(Message::Preview)
            }
            Err(err) => {
                log::warn!("Cannot open {}: {}", path.display(), err);
                self.notice = Some("notification-open-error".to_string());
                Task::none()
            }
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.preview.session() {
            Some(session) => format!("{} - {}", session.request().file.name, app_name),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            self.preview.subscription().map(Message::Preview),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Preview(preview_message) => self.handle_preview_message(preview_message),
            Message::CursorEffects(cursor_message) => {
                update::handle_cursor_effects_message(
                    &mut self.cursor_settings,
                    &mut self.config,
                    &mut self.show_cursor_settings,
                    cursor_message,
                );
                Task::none()
            }
            Message::OpenCursorSettings => {
                self.show_cursor_settings = true;
                Task::none()
            }
            Message::CategorySelected(category) => {
                self.category = category;
                Task::none()
            }
            Message::OpenFileDialog => update::handle_open_file_dialog(self.category),
            Message::OpenFileDialogResult(path) => match path {
                Some(path) => self.open_path(path, self.category),
                None => Task::none(),
            },
            Message::FileDropped(path) => {
                // A drop while the cursor dialog is up would open behind it.
                if self.show_cursor_settings {
                    return Task::none();
                }
                self.open_path(path, self.category)
            }
            Message::WindowOpened(id) => {
                self.window_id = Some(id);
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                // Dropping the session revokes its object URL.
                let _ = self.preview.handle(preview::Message::Close, &self.i18n);
                window::close(id)
            }
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        }
    }

    fn handle_preview_message(&mut self, message: preview::Message) -> Task<Message> {
        let (effect, task) = self.preview.handle(message, &self.i18n);
        let task = task.map(Message::Preview);
        let effect_task = update::apply_preview_effect(
            effect,
            &mut self.config,
            self.window_id.as_ref(),
            self.preview.is_fullscreen(),
        );
        Task::batch([task, effect_task])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            theme: self.theme(),
            config: &self.config,
            preview: &self.preview,
            cursor_settings: &self.cursor_settings,
            show_cursor_settings: self.show_cursor_settings,
            category: self.category,
            notice: self.notice.as_deref(),
        })
    }
}
