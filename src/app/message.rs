// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::preview::FileCategory;
use crate::ui::{cursor_effects, preview};
use iced::window;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Preview(preview::Message),
    CursorEffects(cursor_effects::Message),
    /// Show the cursor effects dialog.
    OpenCursorSettings,
    /// Category the next opened file is previewed as; `None` detects it.
    CategorySelected(Option<FileCategory>),
    /// Trigger the open file dialog from the home screen.
    OpenFileDialog,
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// The main window became available.
    WindowOpened(window::Id),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(window::Id),
    /// Dismiss the notice shown on the home screen.
    DismissNotice,
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional file to preview on startup.
    pub file_path: Option<String>,
    /// Category for `file_path`; inferred from its MIME type when absent.
    pub file_type: Option<FileCategory>,
    /// Open the cursor effects dialog on startup.
    pub cursor_settings: bool,
}
