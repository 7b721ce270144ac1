// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that rendering and playback
//! engines implement. These traits use only domain types, ensuring the
//! preview pipeline stays independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`document`]: PDF rasterization, word-processor rendering, render
//!   surfaces, page rasterization and markup conversion
//! - [`playback`]: Media playback elements
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles)
//! - Traits are `Send + Sync` where they are shared across tasks
//! - Methods return `Result` with [`EngineError`](crate::error::EngineError)
//! - No `async fn` - waiting is done by the pipeline, not by engines

pub mod document;
pub mod playback;

// Re-export main types for convenience
pub use document::{
    DocumentRenderer, EngineResult, MarkupConverter, PageRasterizer, PdfDocument, PdfRasterizer,
    RasterPage, RenderOptions, RenderSurface, SurfaceFactory, SurfaceKind,
};
pub use playback::{MediaBackend, MediaElement};
