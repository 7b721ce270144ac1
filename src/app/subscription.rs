// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window and keyboard events to the application. Key presses
//! already captured by a widget (for instance a focused text input) never
//! reach the preview shortcuts.

use super::Message;
use crate::ui::preview;
use iced::{event, keyboard, window, Subscription};

/// Creates the window and keyboard event subscription.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. } | window::Event::Focused) => {
            Some(Message::WindowOpened(window_id))
        }
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        event::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match status {
            event::Status::Ignored => Some(Message::Preview(preview::Message::KeyPressed(key))),
            event::Status::Captured => None,
        },
        _ => None,
    })
}
