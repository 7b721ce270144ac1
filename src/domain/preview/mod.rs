// SPDX-License-Identifier: MPL-2.0
//! File preview domain types.
//!
//! This module contains the framework-independent model of a preview
//! session: classification, loaded content, pagination, zoom, media
//! transport and page-visibility tracking.

pub mod content;
pub mod page_tracking;
pub mod pagination;
pub mod transport;
pub mod zoom;

// Re-export commonly used types
pub use content::{
    FileCategory, HtmlDocument, ImageSource, LoadGeneration, LoadPhase, LoadedContent, MediaKind,
    MediaSource, PageImage, PreviewKind, StatusNote,
};
pub use pagination::PageCursor;
pub use transport::{MediaEvent, PlaybackRate, TransportState, Volume};
pub use zoom::{DocumentZoom, ImageZoom, PanOffset, PanState};
