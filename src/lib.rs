// SPDX-License-Identifier: MPL-2.0
//! `iced_preview` is a file preview modal and cursor-effects settings dialog
//! built with the Iced GUI framework.
//!
//! The preview shows images, PDF and word-processor documents, plain text,
//! audio and video in a single modal with zoom, page tracking and media
//! transport. Strings are localized with Fluent and user preferences are
//! persisted to a TOML settings file.
//!
//! # Layers
//!
//! - [`domain`]: toolkit-independent values and rules
//! - [`application`]: engine ports and the preview loading pipeline
//! - [`infrastructure`]: built-in engine adapters
//! - [`ui`]: Iced components
//! - [`app`]: the application shell wiring everything together

#![doc(html_root_url = "https://docs.rs/iced_preview/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod ui;

pub use app::{config, i18n};

#[cfg(test)]
mod test_utils;
