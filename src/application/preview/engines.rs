// SPDX-License-Identifier: MPL-2.0
//! The set of engines available to the preview pipeline.

use crate::application::port::{
    DocumentRenderer, MarkupConverter, MediaBackend, PageRasterizer, PdfRasterizer,
    SurfaceFactory,
};
use std::fmt;
use std::sync::Arc;

/// Engines the pipeline may use. A missing engine disables the strategies
/// that need it; the pipeline then falls back or reports `Unsupported`.
#[derive(Clone, Default)]
pub struct Engines {
    pub pdf: Option<Arc<dyn PdfRasterizer>>,
    pub renderer: Option<Arc<dyn DocumentRenderer>>,
    pub surfaces: Option<Arc<dyn SurfaceFactory>>,
    pub rasterizer: Option<Arc<dyn PageRasterizer>>,
    pub markup: Option<Arc<dyn MarkupConverter>>,
    pub media: Option<Arc<dyn MediaBackend>>,
}

impl Engines {
    #[must_use]
    pub fn with_pdf(mut self, pdf: Arc<dyn PdfRasterizer>) -> Self {
        self.pdf = Some(pdf);
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    #[must_use]
    pub fn with_surfaces(mut self, surfaces: Arc<dyn SurfaceFactory>) -> Self {
        self.surfaces = Some(surfaces);
        self
    }

    #[must_use]
    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        self.rasterizer = Some(rasterizer);
        self
    }

    #[must_use]
    pub fn with_markup(mut self, markup: Arc<dyn MarkupConverter>) -> Self {
        self.markup = Some(markup);
        self
    }

    #[must_use]
    pub fn with_media(mut self, media: Arc<dyn MediaBackend>) -> Self {
        self.media = Some(media);
        self
    }
}

impl fmt::Debug for Engines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engines")
            .field("pdf", &self.pdf.is_some())
            .field("renderer", &self.renderer.is_some())
            .field("surfaces", &self.surfaces.is_some())
            .field("rasterizer", &self.rasterizer.is_some())
            .field("markup", &self.markup.is_some())
            .field("media", &self.media.is_some())
            .finish()
    }
}
