// SPDX-License-Identifier: MPL-2.0
//! PDF preview: rasterize the first pages into PNG page images.

use crate::application::port::{PdfRasterizer, RasterPage};
use crate::config::{PDF_MAX_PAGES, PDF_RENDER_SCALE};
use crate::domain::preview::{PageImage, StatusNote};
use crate::error::{EngineError, PreviewError};
use image_rs::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

/// Encodes raw RGBA pixels as a PNG page image.
///
/// # Errors
///
/// Returns an [`EngineError`] if the pixel buffer does not match the
/// declared size or encoding fails.
pub fn encode_page(page: RasterPage) -> Result<PageImage, EngineError> {
    let (width, height) = (page.width, page.height);
    let buffer = RgbaImage::from_raw(width, height, page.rgba)
        .ok_or_else(|| EngineError::new(format!("pixel buffer does not match {width}x{height}")))?;
    let mut png = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(buffer)
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|err| EngineError::new(err.to_string()))?;
    Ok(PageImage {
        png: Arc::new(png.into_inner()),
        width,
        height,
    })
}

/// Rasterizes up to [`PDF_MAX_PAGES`] pages of `bytes`.
///
/// Pages that fail are skipped with a warning; the call only fails when the
/// document cannot be opened or no page could be rendered.
///
/// # Errors
///
/// Returns [`PreviewError::ReadFailure`] for unreadable or empty documents
/// and [`PreviewError::RasterizationFailure`] when every page failed.
pub fn rasterize_pdf(
    bytes: &[u8],
    rasterizer: &dyn PdfRasterizer,
) -> Result<(Vec<PageImage>, StatusNote), PreviewError> {
    let mut document = rasterizer
        .open(bytes)
        .map_err(|err| PreviewError::ReadFailure(format!("cannot open PDF: {err}")))?;

    let total = document.page_count();
    if total == 0 {
        return Err(PreviewError::ReadFailure("PDF has no pages".into()));
    }

    let wanted = total.min(PDF_MAX_PAGES);
    let mut pages = Vec::with_capacity(wanted);
    let mut first_failure = None;

    for index in 0..wanted {
        let rendered = document
            .render_page(index, PDF_RENDER_SCALE)
            .and_then(encode_page);
        match rendered {
            Ok(page) => pages.push(page),
            Err(err) => {
                log::warn!("Skipping PDF page {}: {}", index + 1, err);
                first_failure.get_or_insert(PreviewError::RasterizationFailure {
                    page: index,
                    reason: err.to_string(),
                });
            }
        }
    }

    if pages.is_empty() {
        return Err(first_failure.unwrap_or_else(|| PreviewError::ReadFailure("no pages".into())));
    }

    let note = if total > pages.len() {
        StatusNote::PdfTruncated {
            shown: pages.len(),
            total,
        }
    } else {
        StatusNote::PdfPages { shown: pages.len() }
    };
    log::info!("Rasterized {} of {} PDF pages", pages.len(), total);
    Ok((pages, note))
}
