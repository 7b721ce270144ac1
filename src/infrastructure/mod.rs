// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`docx`]: Minimal `.docx` to HTML converter (implements [`MarkupConverter`])
//! - [`timeline`]: Clock-driven media element (implements [`MediaBackend`])
//!
//! PDF rasterization and page-image rendering of word documents need
//! external engines; [`builtin_engines`] leaves those slots empty so the
//! pipeline falls back to the strategies it can run.
//!
//! [`MarkupConverter`]: crate::application::port::MarkupConverter
//! [`MediaBackend`]: crate::application::port::MediaBackend

pub mod docx;
pub mod timeline;

pub use docx::DocxMarkupConverter;
pub use timeline::{TimelineBackend, TimelineElement};

use crate::application::preview::Engines;
use std::sync::Arc;

/// Engines shipped with the application.
#[must_use]
pub fn builtin_engines() -> Engines {
    Engines::default()
        .with_markup(Arc::new(DocxMarkupConverter::new()))
        .with_media(Arc::new(TimelineBackend))
}
