// SPDX-License-Identifier: MPL-2.0
//! Preview modal orchestrator.
//!
//! Owns at most one [`Session`] at a time. Opening a file resets the
//! session, bumps the load generation and dispatches the loader as a task;
//! results carrying an older generation are discarded and any object URL
//! they registered is revoked. Closing the modal drops the session and
//! releases its URL.

use super::shortcuts::{self, Action};
use super::{document_view, error_state, image_view, loading, transport};
use crate::application::preview::{load, Engines, LoadOutcome, ObjectUrlRegistry, PreviewRequest};
use crate::config::{SHORT_SKIP_SECS, SCROLL_THROTTLE};
use crate::domain::preview::{
    LoadGeneration, LoadPhase, LoadedContent, PageCursor, PreviewKind, StatusNote, Volume,
};
use crate::error::PreviewError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::{button as button_styles, container as container_styles};
use fluent_bundle::FluentValue;
use iced::keyboard::Key;
use iced::widget::{button, Column, Container, Row, Space, Text};
use iced::{alignment, time, Element, Length, Subscription, Task, Theme};
use std::time::Instant;

/// Playback preferences carried across sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub volume: Volume,
    pub muted: bool,
    pub autoplay: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: Volume::default(),
            muted: false,
            autoplay: false,
        }
    }
}

/// Per-type view state once content is ready.
#[derive(Debug)]
enum ContentView {
    Image(image_view::State),
    Document(document_view::State),
    Media(transport::Player),
    Unsupported,
}

/// Everything about the file currently shown. Rebuilt on every open.
#[derive(Debug)]
pub struct Session {
    request: PreviewRequest,
    kind: PreviewKind,
    generation: LoadGeneration,
    phase: LoadPhase,
    loading: loading::State,
    error: Option<error_state::State>,
    content: Option<LoadedContent>,
    status: Option<StatusNote>,
    pages: PageCursor,
    view: Option<ContentView>,
}

impl Session {
    fn new(request: PreviewRequest, generation: LoadGeneration, now: Instant) -> Self {
        let mut loading = loading::State::default();
        loading.start(now);
        Self {
            kind: request.kind(),
            request,
            generation,
            phase: LoadPhase::Loading,
            loading,
            error: None,
            content: None,
            status: None,
            pages: PageCursor::default(),
            view: None,
        }
    }

    #[must_use]
    pub fn request(&self) -> &PreviewRequest {
        &self.request
    }

    #[must_use]
    pub fn kind(&self) -> PreviewKind {
        self.kind
    }

    #[must_use]
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub fn generation(&self) -> LoadGeneration {
        self.generation
    }

    #[must_use]
    pub fn content(&self) -> Option<&LoadedContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusNote> {
        self.status
    }

    #[must_use]
    pub fn pages(&self) -> PageCursor {
        self.pages
    }

    #[must_use]
    pub fn error(&self) -> Option<&error_state::State> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_slow(&self) -> bool {
        self.loading.is_slow()
    }

    /// Kind used for shortcuts: only set once content is ready.
    fn ready_kind(&self) -> Option<PreviewKind> {
        (self.phase == LoadPhase::Ready).then_some(self.kind)
    }

    fn needs_ticks(&self) -> bool {
        self.loading.is_loading()
            || match &self.view {
                Some(ContentView::Document(document)) => document.needs_ticks(),
                Some(ContentView::Media(player)) => player.needs_ticks(),
                _ => false,
            }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded {
        generation: LoadGeneration,
        result: Result<LoadOutcome, PreviewError>,
    },
    Error(error_state::Message),
    Close,
    Tick(Instant),
    KeyPressed(Key),
    Image(image_view::Message),
    Document(document_view::Message),
    Transport(transport::Message),
    PreviousPage,
    NextPage,
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// The modal closed; leave fullscreen if it was active.
    Close { exit_fullscreen: bool },
    ToggleFullscreen,
    ExitFullscreen,
    /// Volume or mute changed.
    PersistPreferences(Preferences),
}

pub struct State {
    engines: Engines,
    urls: ObjectUrlRegistry,
    generation: LoadGeneration,
    session: Option<Session>,
    preferences: Preferences,
    fullscreen: bool,
}

impl State {
    #[must_use]
    pub fn new(engines: Engines, preferences: Preferences) -> Self {
        Self {
            engines,
            urls: ObjectUrlRegistry::new(),
            generation: LoadGeneration::default(),
            session: None,
            preferences,
            fullscreen: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    #[must_use]
    pub fn object_urls(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    /// Opens `request`, replacing whatever session was showing.
    pub fn open(&mut self, request: PreviewRequest) -> Task<Message> {
        self.release_session();
        self.dispatch(request)
    }

    fn dispatch(&mut self, request: PreviewRequest) -> Task<Message> {
        self.generation = self.generation.next();
        let generation = self.generation;
        log::info!(
            "Previewing {} ({}, {:?}) as generation {}",
            request.file.name,
            request.file.mime,
            request.category,
            generation.value()
        );

        let future = load(request.clone(), self.engines.clone(), self.urls.clone());
        self.session = Some(Session::new(request, generation, Instant::now()));
        Task::perform(future, move |result| Message::Loaded { generation, result })
    }

    /// Drops the session and revokes the object URL it owned.
    fn release_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Some(url) = session.content.as_ref().and_then(LoadedContent::object_url) {
                self.urls.revoke(url);
            }
        }
    }

    fn close(&mut self) -> Effect {
        self.release_session();
        let exit_fullscreen = std::mem::take(&mut self.fullscreen);
        Effect::Close { exit_fullscreen }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.session {
            Some(session) if session.needs_ticks() => {
                time::every(SCROLL_THROTTLE).map(Message::Tick)
            }
            _ => Subscription::none(),
        }
    }

    pub fn handle(&mut self, message: Message, i18n: &I18n) -> (Effect, Task<Message>) {
        match message {
            Message::Loaded { generation, result } => {
                self.finish_load(generation, result, i18n);
                (Effect::None, Task::none())
            }
            Message::Error(error_state::Message::ToggleDetails) => {
                if let Some(error) = self.session.as_mut().and_then(|s| s.error.as_mut()) {
                    error.toggle_details();
                }
                (Effect::None, Task::none())
            }
            Message::Error(error_state::Message::Retry) => {
                let Some(request) = self.session.as_ref().map(|s| s.request.clone()) else {
                    return (Effect::None, Task::none());
                };
                self.release_session();
                (Effect::None, self.dispatch(request))
            }
            Message::Close => (self.close(), Task::none()),
            Message::Tick(now) => self.tick(now),
            Message::KeyPressed(key) => {
                let kind = self.session.as_ref().and_then(Session::ready_kind);
                match shortcuts::action_for(&key, kind) {
                    Some(action) => self.shortcut(action),
                    None => (Effect::None, Task::none()),
                }
            }
            Message::Image(message) => {
                if let Some(ContentView::Image(image)) = self.view_mut() {
                    image.update(message);
                }
                (Effect::None, Task::none())
            }
            Message::Document(message) => self.document(message),
            Message::Transport(message) => self.transport(message),
            Message::PreviousPage => self.turn_page(false),
            Message::NextPage => self.turn_page(true),
            Message::ZoomIn => self.zoom(image_view::Message::ZoomIn, document_view::Message::ZoomIn),
            Message::ZoomOut => {
                self.zoom(image_view::Message::ZoomOut, document_view::Message::ZoomOut)
            }
            Message::ResetZoom => {
                self.zoom(image_view::Message::ResetZoom, document_view::Message::ResetZoom)
            }
        }
    }

    fn view_mut(&mut self) -> Option<&mut ContentView> {
        self.session.as_mut().and_then(|session| session.view.as_mut())
    }

    fn finish_load(
        &mut self,
        generation: LoadGeneration,
        result: Result<LoadOutcome, PreviewError>,
        i18n: &I18n,
    ) {
        let current = self.session.as_ref().map(Session::generation);
        if current != Some(generation) {
            log::debug!("Discarding stale load result (generation {})", generation.value());
            if let Some(url) = result.as_ref().ok().and_then(|o| o.content.object_url()) {
                self.urls.revoke(url);
            }
            return;
        }

        let outcome = result.and_then(|outcome| self.build_view(outcome, i18n));
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.loading.stop();

        match outcome {
            Ok((outcome, view)) => {
                log::info!("Preview of {} ready", session.request.file.name);
                session.pages = PageCursor::new(outcome.content.page_count());
                if let ContentView::Document(document) = &view {
                    session.pages.set_total(document.page_total());
                }
                session.status = outcome.status;
                session.content = Some(outcome.content);
                session.view = Some(view);
                session.phase = LoadPhase::Ready;
            }
            Err(err) => {
                log::warn!("Preview of {} failed: {}", session.request.file.name, err);
                session.error = Some(error_state::State::from_error(&err));
                session.phase = LoadPhase::Error;
            }
        }
    }

    /// Builds the per-type view, opening a playback element for media.
    fn build_view(
        &self,
        outcome: LoadOutcome,
        i18n: &I18n,
    ) -> Result<(LoadOutcome, ContentView), PreviewError> {
        let view = match &outcome.content {
            LoadedContent::Image(source) => ContentView::Image(image_view::State::new(source)),
            LoadedContent::Media(source) => {
                let opened = match &self.engines.media {
                    Some(backend) => backend
                        .open(source)
                        .map_err(|err| PreviewError::ReadFailure(err.to_string())),
                    None => Err(PreviewError::Unsupported("no media backend".into())),
                };
                match opened {
                    Ok(element) => ContentView::Media(transport::Player::new(
                        element,
                        source.kind,
                        self.preferences.volume,
                        self.preferences.muted,
                        self.preferences.autoplay,
                    )),
                    Err(err) => {
                        self.urls.revoke(&source.url);
                        return Err(err);
                    }
                }
            }
            LoadedContent::Pages(_) | LoadedContent::Html(_) | LoadedContent::Text(_) => {
                match document_view::State::new(&outcome.content, i18n.tr("preview-page-word")) {
                    Some(document) => ContentView::Document(document),
                    None => ContentView::Unsupported,
                }
            }
            LoadedContent::Unsupported => ContentView::Unsupported,
        };
        Ok((outcome, view))
    }

    fn tick(&mut self, now: Instant) -> (Effect, Task<Message>) {
        let Some(session) = self.session.as_mut() else {
            return (Effect::None, Task::none());
        };
        if session.loading.tick(now) == loading::Effect::BecameSlow {
            log::info!("Preview of {} is taking long", session.request.file.name);
        }
        match session.view.as_mut() {
            Some(ContentView::Document(document)) => {
                if let document_view::Effect::PageVisible(page) = document.tick(now) {
                    session.pages.go_to(page);
                }
            }
            Some(ContentView::Media(player)) => player.tick(now),
            _ => {}
        }
        (Effect::None, Task::none())
    }

    fn shortcut(&mut self, action: Action) -> (Effect, Task<Message>) {
        match action {
            Action::Close if self.fullscreen => {
                self.fullscreen = false;
                (Effect::ExitFullscreen, Task::none())
            }
            Action::Close => (self.close(), Task::none()),
            Action::ZoomIn => self.zoom(image_view::Message::ZoomIn, document_view::Message::ZoomIn),
            Action::ZoomOut => {
                self.zoom(image_view::Message::ZoomOut, document_view::Message::ZoomOut)
            }
            Action::ResetZoom => {
                self.zoom(image_view::Message::ResetZoom, document_view::Message::ResetZoom)
            }
            Action::PreviousPage => self.turn_page(false),
            Action::NextPage => self.turn_page(true),
            Action::TogglePlay => self.transport(transport::Message::TogglePlay),
            Action::SkipBackward => self.transport(transport::Message::Skip(-SHORT_SKIP_SECS)),
            Action::SkipForward => self.transport(transport::Message::Skip(SHORT_SKIP_SECS)),
            Action::VolumeUp => self.transport(transport::Message::VolumeStep(true)),
            Action::VolumeDown => self.transport(transport::Message::VolumeStep(false)),
            Action::ToggleMute => self.transport(transport::Message::ToggleMute),
            Action::ToggleFullscreen => self.transport(transport::Message::ToggleFullscreen),
        }
    }

    fn zoom(
        &mut self,
        image: image_view::Message,
        document: document_view::Message,
    ) -> (Effect, Task<Message>) {
        match self.view_mut() {
            Some(ContentView::Image(state)) => {
                state.update(image);
                (Effect::None, Task::none())
            }
            Some(ContentView::Document(_)) => self.document(document),
            _ => (Effect::None, Task::none()),
        }
    }

    fn document(&mut self, message: document_view::Message) -> (Effect, Task<Message>) {
        let Some(session) = self.session.as_mut() else {
            return (Effect::None, Task::none());
        };
        let Some(ContentView::Document(document)) = session.view.as_mut() else {
            return (Effect::None, Task::none());
        };
        match document.update(message, Instant::now()) {
            document_view::Effect::PageVisible(page) => {
                session.pages.go_to(page);
                (Effect::None, Task::none())
            }
            document_view::Effect::ZoomChanged => {
                let task = document.scroll_to_page(session.pages.current());
                (Effect::None, task.map(Message::Document))
            }
            document_view::Effect::None => (Effect::None, Task::none()),
        }
    }

    fn turn_page(&mut self, forward: bool) -> (Effect, Task<Message>) {
        let Some(session) = self.session.as_mut() else {
            return (Effect::None, Task::none());
        };
        let moved = if forward {
            session.pages.next()
        } else {
            session.pages.previous()
        };
        match session.view.as_mut() {
            Some(ContentView::Document(document)) if moved => {
                let task = document.scroll_to_page(session.pages.current());
                (Effect::None, task.map(Message::Document))
            }
            _ => (Effect::None, Task::none()),
        }
    }

    fn transport(&mut self, message: transport::Message) -> (Effect, Task<Message>) {
        let Some(ContentView::Media(player)) = self.view_mut() else {
            return (Effect::None, Task::none());
        };
        let effect = match player.update(message) {
            transport::Effect::None => Effect::None,
            transport::Effect::PreferencesChanged => {
                let (volume, muted) = (player.state().volume(), player.state().is_muted());
                self.preferences.volume = volume;
                self.preferences.muted = muted;
                Effect::PersistPreferences(self.preferences)
            }
            transport::Effect::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                Effect::ToggleFullscreen
            }
        };
        (effect, Task::none())
    }

    // =========================================================================
    // View
    // =========================================================================

    pub fn view<'a>(&'a self, i18n: &'a I18n, theme: &Theme) -> Element<'a, Message> {
        let Some(session) = &self.session else {
            return Space::new().into();
        };

        let body: Element<'a, Message> = match session.phase {
            LoadPhase::Idle | LoadPhase::Loading => session.loading.view(i18n, theme),
            LoadPhase::Error => match &session.error {
                Some(error) => error.view(i18n).map(Message::Error),
                None => Space::new().into(),
            },
            LoadPhase::Ready => self.content_view(session, i18n),
        };

        let mut column = Column::new()
            .spacing(spacing::SM)
            .push(header(session, i18n));
        if let Some(toolbar) = toolbar(session, i18n) {
            column = column.push(toolbar);
        }
        column = column.push(Container::new(body).width(Length::Fill).height(Length::Fill));

        let (width, height) = if self.fullscreen {
            (Length::Fill, Length::Fill)
        } else {
            (
                Length::Fixed(sizing::PREVIEW_MODAL_WIDTH),
                Length::Fixed(sizing::PREVIEW_MODAL_HEIGHT),
            )
        };

        Container::new(column)
            .width(width)
            .height(height)
            .padding(spacing::MD)
            .style(container_styles::dialog)
            .into()
    }

    fn content_view<'a>(&'a self, session: &'a Session, i18n: &'a I18n) -> Element<'a, Message> {
        match &session.view {
            Some(ContentView::Image(image)) => image.view().map(Message::Image),
            Some(ContentView::Document(document)) => document.view().map(Message::Document),
            Some(ContentView::Media(player)) => player
                .view(i18n, &session.request.file.name)
                .map(Message::Transport),
            Some(ContentView::Unsupported) | None => Container::new(
                Text::new(i18n.tr("preview-unsupported")).size(typography::BODY),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        }
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.release_session();
    }
}

/// Human-readable file size.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

fn status_text(note: StatusNote, i18n: &I18n) -> String {
    let args: Vec<(&str, FluentValue<'_>)> = note
        .args()
        .into_iter()
        .map(|(name, value)| (name, FluentValue::from(value)))
        .collect();
    i18n.tr_with_args(note.i18n_key(), &args)
}

fn header<'a>(session: &'a Session, i18n: &I18n) -> Element<'a, Message> {
    let file = &session.request.file;
    let mut info = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(file.name.as_str()).size(typography::TITLE_SM))
        .push(Text::new(format_size(file.size)).size(typography::CAPTION));

    if let Some(note) = session.status {
        info = info.push(
            Container::new(Text::new(status_text(note, i18n)).size(typography::CAPTION))
                .padding([spacing::XXS, spacing::XS])
                .style(container_styles::note),
        );
    }

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Top)
        .push(Container::new(info).width(Length::Fill))
        .push(
            button(Text::new(i18n.tr("preview-close")))
                .on_press(Message::Close)
                .style(button_styles::unselected),
        )
        .into()
}

fn toolbar<'a>(session: &'a Session, i18n: &I18n) -> Option<Element<'a, Message>> {
    let zoom_percent = match &session.view {
        Some(ContentView::Image(image)) => Some(image.zoom().percent()),
        Some(ContentView::Document(document)) => Some(document.zoom().percent()),
        _ => None,
    }?;

    let small_button = |label: String, message: Message| {
        button(Text::new(label).size(typography::CAPTION))
            .on_press(message)
            .style(button_styles::unselected)
    };

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(small_button("-".to_string(), Message::ZoomOut))
        .push(Text::new(format!("{zoom_percent}%")).size(typography::CAPTION))
        .push(small_button("+".to_string(), Message::ZoomIn))
        .push(small_button(i18n.tr("preview-zoom-reset"), Message::ResetZoom))
        .push(Space::new().width(Length::Fill));

    let pages = session.pages;
    if pages.is_multi_page() {
        let mut previous = button(Text::new(i18n.tr("preview-previous-page")).size(typography::CAPTION))
            .style(button_styles::unselected);
        if pages.has_previous() {
            previous = previous.on_press(Message::PreviousPage);
        }
        let mut next = button(Text::new(i18n.tr("preview-next-page")).size(typography::CAPTION))
            .style(button_styles::unselected);
        if pages.has_next() {
            next = next.on_press(Message::NextPage);
        }
        let indicator = i18n.tr_with_args(
            "preview-page-indicator",
            &[
                ("current", FluentValue::from(pages.current())),
                ("total", FluentValue::from(pages.total())),
            ],
        );
        row = row
            .push(previous)
            .push(Text::new(indicator).size(typography::CAPTION))
            .push(next);
    }

    Some(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::preview::FileHandle;
    use crate::domain::preview::{FileCategory, ImageSource, MediaKind, MediaSource};
    use crate::application::port::{EngineResult, MediaBackend, MediaElement};
    use crate::infrastructure::TimelineElement;
    use iced::keyboard::key::Named;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn request(name: &str, category: FileCategory) -> PreviewRequest {
        let file = FileHandle {
            name: name.into(),
            size: 10,
            mime: crate::application::preview::file::guess_mime(name).into(),
            path: PathBuf::from(name),
        };
        PreviewRequest::new(file, category)
    }

    /// Opens a one-minute timeline without touching the file system.
    struct MinuteBackend;

    impl MediaBackend for MinuteBackend {
        fn open(&self, _source: &MediaSource) -> EngineResult<Box<dyn MediaElement>> {
            Ok(Box::new(TimelineElement::new(Some(60.0))))
        }
    }

    fn state() -> State {
        State::new(
            Engines::default().with_media(Arc::new(MinuteBackend)),
            Preferences::default(),
        )
    }

    fn text_outcome(text: &str) -> Result<LoadOutcome, PreviewError> {
        Ok(LoadOutcome {
            content: LoadedContent::Text(text.into()),
            status: None,
        })
    }

    fn media_outcome(state: &State, kind: MediaKind) -> Result<LoadOutcome, PreviewError> {
        let path = PathBuf::from("clip.mp3");
        Ok(LoadOutcome {
            content: LoadedContent::Media(MediaSource {
                url: state.urls.create(&path),
                path,
                kind,
            }),
            status: None,
        })
    }

    fn current_generation(state: &State) -> LoadGeneration {
        state.session().map(Session::generation).unwrap_or_default()
    }

    #[test]
    fn open_enters_loading_with_new_generation() {
        let mut state = state();
        let _ = state.open(request("notes.txt", FileCategory::Document));
        let first = current_generation(&state);
        assert_eq!(state.session().map(Session::phase), Some(LoadPhase::Loading));

        let _ = state.open(request("other.txt", FileCategory::Document));
        assert!(current_generation(&state) > first);
    }

    #[test]
    fn ready_result_builds_document_view() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("notes.txt", FileCategory::Document));
        let generation = current_generation(&state);
        state.handle(
            Message::Loaded {
                generation,
                result: text_outcome("hello"),
            },
            &i18n,
        );

        let session = state.session().unwrap();
        assert_eq!(session.phase(), LoadPhase::Ready);
        assert_eq!(session.pages().total(), 1);
        assert!(matches!(session.view, Some(ContentView::Document(_))));
    }

    #[test]
    fn page_cursor_counts_the_sheets_on_screen() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("report.docx", FileCategory::Document));
        let generation = current_generation(&state);
        state.handle(
            Message::Loaded {
                generation,
                result: Ok(LoadOutcome {
                    content: LoadedContent::Html(crate::domain::preview::HtmlDocument {
                        html: "<div class=\"page\">a</div><div class=\"page\">b</div>\
                               <div class=\"page\">c</div>"
                            .into(),
                        page_count: 1,
                    }),
                    status: None,
                }),
            },
            &i18n,
        );

        let pages = state.session().unwrap().pages();
        assert_eq!(pages.total(), 3);
        assert!(pages.has_next());
    }

    #[test]
    fn media_duration_is_known_before_play() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("song.mp3", FileCategory::Audio));
        let generation = current_generation(&state);
        let outcome = media_outcome(&state, MediaKind::Audio);
        state.handle(Message::Loaded { generation, result: outcome }, &i18n);

        let Some(ContentView::Media(player)) = state.session().and_then(|s| s.view.as_ref()) else {
            panic!("expected a media view");
        };
        assert_eq!(player.state().duration(), Some(60.0));
        assert!(!player.state().is_playing());
    }

    #[test]
    fn stale_results_are_discarded_and_urls_revoked() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("song.mp3", FileCategory::Audio));
        let stale = current_generation(&state);
        let _ = state.open(request("notes.txt", FileCategory::Document));

        let outcome = media_outcome(&state, MediaKind::Audio);
        assert_eq!(state.object_urls().live_count(), 1);
        state.handle(
            Message::Loaded {
                generation: stale,
                result: outcome,
            },
            &i18n,
        );

        assert_eq!(state.object_urls().live_count(), 0);
        assert_eq!(state.session().map(Session::phase), Some(LoadPhase::Loading));
    }

    #[test]
    fn close_revokes_media_url() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("song.mp3", FileCategory::Audio));
        let generation = current_generation(&state);
        let outcome = media_outcome(&state, MediaKind::Audio);
        state.handle(Message::Loaded { generation, result: outcome }, &i18n);
        assert_eq!(state.object_urls().live_count(), 1);

        let (effect, _) = state.handle(Message::Close, &i18n);
        assert_eq!(effect, Effect::Close { exit_fullscreen: false });
        assert!(!state.is_open());
        assert_eq!(state.object_urls().live_count(), 0);
    }

    #[test]
    fn missing_media_backend_is_unsupported() {
        let i18n = I18n::default();
        let mut state = State::new(Engines::default(), Preferences::default());
        let _ = state.open(request("song.mp3", FileCategory::Audio));
        let generation = current_generation(&state);
        let outcome = media_outcome(&state, MediaKind::Audio);
        state.handle(Message::Loaded { generation, result: outcome }, &i18n);

        let session = state.session().unwrap();
        assert_eq!(session.phase(), LoadPhase::Error);
        assert_eq!(
            session.error().map(error_state::State::friendly_key),
            Some("error-preview-unsupported")
        );
        assert_eq!(state.object_urls().live_count(), 0);
    }

    #[test]
    fn failure_then_retry_redispatches() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("notes.txt", FileCategory::Document));
        let generation = current_generation(&state);
        state.handle(
            Message::Loaded {
                generation,
                result: Err(PreviewError::ReadFailure("gone".into())),
            },
            &i18n,
        );
        assert_eq!(state.session().map(Session::phase), Some(LoadPhase::Error));

        state.handle(Message::Error(error_state::Message::ToggleDetails), &i18n);
        assert!(state.session().and_then(Session::error).unwrap().show_details());

        let _ = state.handle(Message::Error(error_state::Message::Retry), &i18n);
        assert_eq!(state.session().map(Session::phase), Some(LoadPhase::Loading));
        assert!(current_generation(&state) > generation);
    }

    #[test]
    fn escape_leaves_fullscreen_before_closing() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("clip.mp4", FileCategory::Video));
        let generation = current_generation(&state);
        let outcome = media_outcome(&state, MediaKind::Video);
        state.handle(Message::Loaded { generation, result: outcome }, &i18n);

        let (effect, _) = state.handle(Message::KeyPressed(Key::Character("f".into())), &i18n);
        assert_eq!(effect, Effect::ToggleFullscreen);
        assert!(state.is_fullscreen());

        let escape = Message::KeyPressed(Key::Named(Named::Escape));
        let (effect, _) = state.handle(escape.clone(), &i18n);
        assert_eq!(effect, Effect::ExitFullscreen);
        assert!(state.is_open());

        let (effect, _) = state.handle(escape, &i18n);
        assert_eq!(effect, Effect::Close { exit_fullscreen: false });
    }

    #[test]
    fn volume_shortcuts_persist_preferences() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("song.mp3", FileCategory::Audio));
        let generation = current_generation(&state);
        let outcome = media_outcome(&state, MediaKind::Audio);
        state.handle(Message::Loaded { generation, result: outcome }, &i18n);

        let (effect, _) = state.handle(Message::KeyPressed(Key::Character("m".into())), &i18n);
        let Effect::PersistPreferences(preferences) = effect else {
            panic!("expected preferences, got {effect:?}");
        };
        assert!(preferences.muted);
        assert!(state.preferences().muted);
    }

    #[test]
    fn zoom_shortcuts_reach_the_image() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("photo.png", FileCategory::Image));
        let generation = current_generation(&state);
        state.handle(
            Message::Loaded {
                generation,
                result: Ok(LoadOutcome {
                    content: LoadedContent::Image(ImageSource {
                        path: PathBuf::from("photo.png"),
                        width: 10,
                        height: 10,
                    }),
                    status: None,
                }),
            },
            &i18n,
        );

        state.handle(Message::KeyPressed(Key::Character("+".into())), &i18n);
        let Some(ContentView::Image(image)) = state.session().and_then(|s| s.view.as_ref()) else {
            panic!("image view expected");
        };
        assert_eq!(image.zoom().percent(), 125);
    }

    #[test]
    fn shortcuts_ignored_while_loading() {
        let i18n = I18n::default();
        let mut state = state();
        let _ = state.open(request("photo.png", FileCategory::Image));
        let (effect, _) = state.handle(Message::KeyPressed(Key::Character("+".into())), &i18n);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
