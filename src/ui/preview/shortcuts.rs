// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcuts of the preview modal, scoped by preview kind.

use crate::domain::preview::PreviewKind;
use iced::keyboard::{key::Named, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    PreviousPage,
    NextPage,
    TogglePlay,
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    Close,
}

/// Maps a key press to an action. `kind` is `None` until content is ready,
/// in which case only Escape does anything.
#[must_use]
pub fn action_for(key: &Key, kind: Option<PreviewKind>) -> Option<Action> {
    if matches!(key, Key::Named(Named::Escape)) {
        return Some(Action::Close);
    }
    let kind = kind?;

    let zoomable = kind == PreviewKind::Image || kind.is_document();

    match key {
        Key::Character(c) => match c.as_str() {
            "+" | "=" if zoomable => Some(Action::ZoomIn),
            "-" if zoomable => Some(Action::ZoomOut),
            "0" if zoomable => Some(Action::ResetZoom),
            "m" | "M" if kind.is_media() => Some(Action::ToggleMute),
            "f" | "F" if kind == PreviewKind::Video => Some(Action::ToggleFullscreen),
            " " if kind.is_media() => Some(Action::TogglePlay),
            _ => None,
        },
        Key::Named(named) if kind.is_media() => match named {
            Named::Space => Some(Action::TogglePlay),
            Named::ArrowLeft => Some(Action::SkipBackward),
            Named::ArrowRight => Some(Action::SkipForward),
            Named::ArrowUp => Some(Action::VolumeUp),
            Named::ArrowDown => Some(Action::VolumeDown),
            _ => None,
        },
        Key::Named(Named::PageUp) if kind.is_document() => Some(Action::PreviousPage),
        Key::Named(Named::PageDown) if kind.is_document() => Some(Action::NextPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(value: &str) -> Key {
        Key::Character(value.into())
    }

    #[test]
    fn escape_always_closes() {
        assert_eq!(
            action_for(&Key::Named(Named::Escape), None),
            Some(Action::Close)
        );
        assert_eq!(
            action_for(&Key::Named(Named::Escape), Some(PreviewKind::Video)),
            Some(Action::Close)
        );
    }

    #[test]
    fn nothing_else_while_loading() {
        assert_eq!(action_for(&ch("+"), None), None);
        assert_eq!(action_for(&Key::Named(Named::Space), None), None);
    }

    #[test]
    fn zoom_keys_for_images_and_documents_only() {
        assert_eq!(action_for(&ch("+"), Some(PreviewKind::Image)), Some(Action::ZoomIn));
        assert_eq!(action_for(&ch("="), Some(PreviewKind::Pdf)), Some(Action::ZoomIn));
        assert_eq!(action_for(&ch("-"), Some(PreviewKind::Text)), Some(Action::ZoomOut));
        assert_eq!(
            action_for(&ch("0"), Some(PreviewKind::WordDocument)),
            Some(Action::ResetZoom)
        );
        assert_eq!(action_for(&ch("+"), Some(PreviewKind::Audio)), None);
    }

    #[test]
    fn media_keys() {
        let audio = Some(PreviewKind::Audio);
        assert_eq!(
            action_for(&Key::Named(Named::Space), audio),
            Some(Action::TogglePlay)
        );
        assert_eq!(
            action_for(&Key::Named(Named::ArrowLeft), audio),
            Some(Action::SkipBackward)
        );
        assert_eq!(
            action_for(&Key::Named(Named::ArrowUp), audio),
            Some(Action::VolumeUp)
        );
        assert_eq!(action_for(&ch("m"), audio), Some(Action::ToggleMute));
        assert_eq!(action_for(&ch("f"), audio), None);
        assert_eq!(
            action_for(&ch("F"), Some(PreviewKind::Video)),
            Some(Action::ToggleFullscreen)
        );
        assert_eq!(action_for(&Key::Named(Named::ArrowLeft), Some(PreviewKind::Image)), None);
    }

    #[test]
    fn page_keys_for_documents() {
        assert_eq!(
            action_for(&Key::Named(Named::PageDown), Some(PreviewKind::Pdf)),
            Some(Action::NextPage)
        );
        assert_eq!(
            action_for(&Key::Named(Named::PageUp), Some(PreviewKind::WordDocument)),
            Some(Action::PreviousPage)
        );
        assert_eq!(action_for(&Key::Named(Named::PageUp), Some(PreviewKind::Image)), None);
    }
}
