// SPDX-License-Identifier: MPL-2.0
//! Document rendering port definitions.
//!
//! PDF rasterization, word-processor rendering and page rasterization are
//! provided by external engines. This module defines the traits those
//! engines implement; the preview pipeline only talks to these traits.
//!
//! # Design Notes
//!
//! - Methods are synchronous; the pipeline runs them inside an async `Task`
//! - Engines report failures as [`EngineError`]; the pipeline maps them to
//!   [`PreviewError`](crate::error::PreviewError) variants
//! - A [`RenderSurface`] is a temporary layout target. Whoever creates one
//!   must call [`RenderSurface::remove`] exactly once, on every path

use crate::error::EngineError;

pub type EngineResult<T> = Result<T, EngineError>;

/// Raw RGBA8 pixels produced by a rasterizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterPage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

// =============================================================================
// PDF
// =============================================================================

/// Opens PDF documents.
pub trait PdfRasterizer: Send + Sync {
    /// Parses `bytes` into a document.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the data is not a readable PDF.
    fn open(&self, bytes: &[u8]) -> EngineResult<Box<dyn PdfDocument>>;
}

/// An opened PDF document.
pub trait PdfDocument: Send {
    fn page_count(&self) -> usize;

    /// Renders page `index` (zero-based) at `scale` times its natural size.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if this page cannot be rendered.
    fn render_page(&mut self, index: usize, scale: f32) -> EngineResult<RasterPage>;
}

// =============================================================================
// Word-processor documents
// =============================================================================

/// Options forwarded to the word-processor renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub headers: bool,
    pub footers: bool,
    pub footnotes: bool,
    pub endnotes: bool,
    pub page_breaks: bool,
    /// Opt into renderer features that are not yet stable.
    pub experimental: bool,
    /// Lay out pages at their declared width instead of the container width.
    pub honor_page_width: bool,
}

impl RenderOptions {
    /// Everything enabled, for page-image rendering.
    #[must_use]
    pub fn max_fidelity() -> Self {
        Self {
            headers: true,
            footers: true,
            footnotes: true,
            endnotes: true,
            page_breaks: true,
            experimental: true,
            honor_page_width: true,
        }
    }

    /// Stable options for HTML output.
    #[must_use]
    pub fn html() -> Self {
        Self {
            experimental: false,
            honor_page_width: false,
            ..Self::max_fidelity()
        }
    }
}

/// Where a surface lives while the renderer lays out into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Off-screen, attached to the main document.
    Detached,
    /// Inside an isolated frame with its own style scope.
    IsolatedFrame,
}

/// A temporary layout target holding rendered page sections.
pub trait RenderSurface: Send {
    /// Number of rendered page sections.
    fn page_sections(&self) -> usize;

    /// Makes section `index` laid out and visible so it can be rasterized.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the section does not exist.
    fn force_visible(&mut self, index: usize) -> EngineResult<()>;

    /// Injects layout-reset styles into an isolated surface.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the surface has no style scope.
    fn inject_reset_styles(&mut self) -> EngineResult<()>;

    /// True once fonts, images and frame content have finished loading.
    fn is_settled(&self) -> bool;

    /// Tears the surface down. Called exactly once.
    fn remove(&mut self);
}

/// Creates render surfaces.
pub trait SurfaceFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the surface cannot be created.
    fn create(&self, kind: SurfaceKind, width: u32, height: u32)
        -> EngineResult<Box<dyn RenderSurface>>;
}

/// Renders word-processor documents.
pub trait DocumentRenderer: Send + Sync {
    /// Lays `bytes` out into `surface` as page sections.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the document cannot be rendered.
    fn render_into(
        &self,
        bytes: &[u8],
        surface: &mut dyn RenderSurface,
        options: &RenderOptions,
    ) -> EngineResult<()>;

    /// Renders `bytes` to an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the document cannot be rendered.
    fn render_html(&self, bytes: &[u8], options: &RenderOptions) -> EngineResult<String>;
}

/// Rasterizes one page section of a surface.
pub trait PageRasterizer: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the section cannot be captured.
    fn rasterize(
        &self,
        surface: &dyn RenderSurface,
        section: usize,
        scale: f32,
        page_size: (u32, u32),
    ) -> EngineResult<RasterPage>;
}

/// Converts a word-processor document into a bare HTML body fragment.
pub trait MarkupConverter: Send + Sync {
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the document cannot be read.
    fn convert_to_html(&self, bytes: &[u8]) -> EngineResult<String>;
}
