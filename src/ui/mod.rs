// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: each
//! owns a `State`, handles its own `Message`s and reports upward through an
//! `Event` or `Effect`.
//!
//! - [`cursor_effects`] - Cursor-trail settings dialog
//! - [`preview`] - File preview modal
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod cursor_effects;
pub mod design_tokens;
pub mod preview;
pub mod styles;
pub mod theming;
pub mod widgets;
