// SPDX-License-Identifier: MPL-2.0
//! Word-processor document conversion chain.
//!
//! Four strategies are tried in order, each only when the previous one
//! failed or produced nothing:
//!
//! 1. **Direct page images** - render into a detached surface with every
//!    layout feature on, wait for it to settle, rasterize up to ten sections
//! 2. **Isolated frame** - same in an isolated frame with layout-reset
//!    styles, rasterizing up to five sections at a lower scale
//! 3. **Enhanced HTML** - render an HTML fragment and count its pages
//! 4. **Minimal markup** - extract a bare HTML body from the document
//!
//! Render surfaces never outlive the tier that created them.

use crate::application::port::{RenderOptions, RenderSurface, SurfaceKind};
use crate::application::preview::engines::Engines;
use crate::application::preview::html_blocks;
use crate::application::preview::pdf::encode_page;
use crate::config::{
    DIRECT_TIER_MAX_PAGES, DIRECT_TIER_SCALE, FRAME_SETTLE_DELAY, FRAME_TIER_MAX_PAGES,
    FRAME_TIER_SCALE, PAGE_HEIGHT_PX, PAGE_WIDTH_PX, RENDER_SETTLE_DELAY, SETTLE_POLL_INTERVAL,
};
use crate::domain::preview::{HtmlDocument, LoadedContent, PageImage, StatusNote};
use crate::error::PreviewError;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

/// Content and status note produced by the first successful tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub content: LoadedContent,
    pub status: StatusNote,
}

// =============================================================================
// Surface lifetime
// =============================================================================

/// Owns a render surface and removes it when dropped.
struct SurfaceGuard {
    surface: Box<dyn RenderSurface>,
}

impl SurfaceGuard {
    fn new(surface: Box<dyn RenderSurface>) -> Self {
        Self { surface }
    }
}

impl Deref for SurfaceGuard {
    type Target = dyn RenderSurface;

    fn deref(&self) -> &Self::Target {
        self.surface.as_ref()
    }
}

impl DerefMut for SurfaceGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface.as_mut()
    }
}

impl Drop for SurfaceGuard {
    fn drop(&mut self) {
        self.surface.remove();
    }
}

/// Waits until `surface` reports it has settled, for at most `max_delay`.
async fn settle(surface: &mut dyn RenderSurface, max_delay: Duration) {
    let deadline = tokio::time::Instant::now() + max_delay;
    loop {
        if surface.is_settled() {
            return;
        }
        let now = tokio::time::Instant::now();
        if now >= deadline {
            log::debug!("Surface did not signal completion within {:?}", max_delay);
            return;
        }
        tokio::time::sleep(SETTLE_POLL_INTERVAL.min(deadline - now)).await;
    }
}

// =============================================================================
// Tiers
// =============================================================================

fn tier_failure(tier: u8, reason: impl ToString) -> PreviewError {
    PreviewError::ConversionFailure {
        tier,
        reason: reason.to_string(),
    }
}

/// Rasterizes the first `max_pages` sections of a settled surface. Failing
/// sections are skipped.
fn rasterize_sections(
    engines: &Engines,
    surface: &mut dyn RenderSurface,
    tier: u8,
    max_pages: usize,
    scale: f32,
) -> Result<Vec<PageImage>, PreviewError> {
    let rasterizer = engines
        .rasterizer
        .as_ref()
        .ok_or_else(|| tier_failure(tier, "no page rasterizer"))?;

    let count = surface.page_sections().min(max_pages);
    let mut pages = Vec::with_capacity(count);
    for index in 0..count {
        let captured = surface.force_visible(index).and_then(|()| {
            rasterizer.rasterize(&*surface, index, scale, (PAGE_WIDTH_PX, PAGE_HEIGHT_PX))
        });
        match captured.and_then(encode_page) {
            Ok(page) => pages.push(page),
            Err(err) => log::warn!("Tier {}: skipping page {}: {}", tier, index + 1, err),
        }
    }
    Ok(pages)
}

async fn direct_page_images(bytes: &[u8], engines: &Engines) -> Result<Vec<PageImage>, PreviewError> {
    const TIER: u8 = 1;
    let renderer = engines
        .renderer
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no document renderer"))?;
    let factory = engines
        .surfaces
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no render surface"))?;

    let mut surface = SurfaceGuard::new(
        factory
            .create(SurfaceKind::Detached, PAGE_WIDTH_PX, PAGE_HEIGHT_PX)
            .map_err(|err| tier_failure(TIER, err))?,
    );
    renderer
        .render_into(bytes, &mut *surface, &RenderOptions::max_fidelity())
        .map_err(|err| tier_failure(TIER, err))?;
    settle(&mut *surface, RENDER_SETTLE_DELAY).await;

    rasterize_sections(engines, &mut *surface, TIER, DIRECT_TIER_MAX_PAGES, DIRECT_TIER_SCALE)
}

async fn isolated_frame_images(
    bytes: &[u8],
    engines: &Engines,
) -> Result<Vec<PageImage>, PreviewError> {
    const TIER: u8 = 2;
    let renderer = engines
        .renderer
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no document renderer"))?;
    let factory = engines
        .surfaces
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no render surface"))?;

    let mut frame = SurfaceGuard::new(
        factory
            .create(SurfaceKind::IsolatedFrame, PAGE_WIDTH_PX, PAGE_HEIGHT_PX)
            .map_err(|err| tier_failure(TIER, err))?,
    );
    frame
        .inject_reset_styles()
        .map_err(|err| tier_failure(TIER, err))?;
    renderer
        .render_into(bytes, &mut *frame, &RenderOptions::max_fidelity())
        .map_err(|err| tier_failure(TIER, err))?;
    settle(&mut *frame, FRAME_SETTLE_DELAY).await;

    rasterize_sections(engines, &mut *frame, TIER, FRAME_TIER_MAX_PAGES, FRAME_TIER_SCALE)
}

/// Number of pages the document view shows for `html`, at least one.
#[must_use]
pub fn count_html_pages(html: &str) -> usize {
    html_blocks::page_total(&html_blocks::parse(html))
}

/// Wraps a renderer fragment in the presentational container.
#[must_use]
pub fn wrap_rendered_html(fragment: &str) -> String {
    format!("<article class=\"document-preview\">\n{fragment}\n</article>")
}

/// Wraps a bare body fragment in one generic page container.
#[must_use]
pub fn wrap_basic_html(body: &str) -> String {
    format!("<div class=\"page\">\n{body}\n</div>")
}

fn enhanced_html(bytes: &[u8], engines: &Engines) -> Result<HtmlDocument, PreviewError> {
    const TIER: u8 = 3;
    let renderer = engines
        .renderer
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no document renderer"))?;
    let fragment = renderer
        .render_html(bytes, &RenderOptions::html())
        .map_err(|err| tier_failure(TIER, err))?;
    let html = wrap_rendered_html(&fragment);
    Ok(HtmlDocument {
        page_count: count_html_pages(&html),
        html,
    })
}

fn minimal_markup(bytes: &[u8], engines: &Engines) -> Result<HtmlDocument, PreviewError> {
    const TIER: u8 = 4;
    let converter = engines
        .markup
        .as_ref()
        .ok_or_else(|| tier_failure(TIER, "no markup converter"))?;
    let body = converter
        .convert_to_html(bytes)
        .map_err(|err| tier_failure(TIER, err))?;
    Ok(HtmlDocument {
        html: wrap_basic_html(&body),
        page_count: 1,
    })
}

// =============================================================================
// Chain
// =============================================================================

fn log_tier_failure(err: &PreviewError) {
    log::warn!("{}", err);
}

/// Converts a word-processor document with the first tier that succeeds.
///
/// # Errors
///
/// Returns [`PreviewError::TerminalFailure`] when all four tiers failed.
pub async fn convert_word_document(
    bytes: &[u8],
    engines: &Engines,
) -> Result<Converted, PreviewError> {
    let mut reasons = Vec::new();

    match direct_page_images(bytes, engines).await {
        Ok(pages) if !pages.is_empty() => {
            log::info!("Word document rendered as {} page image(s)", pages.len());
            return Ok(Converted {
                status: StatusNote::DocxImages { pages: pages.len() },
                content: LoadedContent::Pages(pages),
            });
        }
        Ok(_) => {
            log::debug!("Tier 1 produced no pages");
            reasons.push("tier 1: no pages".to_string());
        }
        Err(err) => {
            log_tier_failure(&err);
            reasons.push(err.detail());
        }
    }

    match isolated_frame_images(bytes, engines).await {
        Ok(pages) if !pages.is_empty() => {
            log::info!("Word document rendered in isolated frame ({} pages)", pages.len());
            return Ok(Converted {
                status: StatusNote::DocxFrame { pages: pages.len() },
                content: LoadedContent::Pages(pages),
            });
        }
        Ok(_) => {
            log::debug!("Tier 2 produced no pages");
            reasons.push("tier 2: no pages".to_string());
        }
        Err(err) => {
            log_tier_failure(&err);
            reasons.push(err.detail());
        }
    }

    match enhanced_html(bytes, engines) {
        Ok(document) => {
            log::info!("Word document rendered as HTML ({} pages)", document.page_count);
            return Ok(Converted {
                status: StatusNote::DocxHtml {
                    pages: document.page_count,
                },
                content: LoadedContent::Html(document),
            });
        }
        Err(err) => {
            log_tier_failure(&err);
            reasons.push(err.detail());
        }
    }

    match minimal_markup(bytes, engines) {
        Ok(document) => {
            log::info!("Word document rendered with the basic converter");
            Ok(Converted {
                status: StatusNote::DocxBasic,
                content: LoadedContent::Html(document),
            })
        }
        Err(err) => {
            log_tier_failure(&err);
            reasons.push(err.detail());
            Err(PreviewError::TerminalFailure(reasons.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_page_count_ignores_lookalike_tags() {
        assert_eq!(count_html_pages("<p>no pages</p>"), 1);
        assert_eq!(
            count_html_pages("<section class=\"docx\">a</section><SECTION>b</SECTION>"),
            2
        );
        assert_eq!(count_html_pages("<sections></sections>"), 1);
    }

    #[test]
    fn html_page_count_matches_the_rendered_sheets() {
        let generic = wrap_rendered_html(
            "<div class=\"page\"><p>a</p></div>\
             <div class=\"page\"><p>b</p></div>\
             <div class=\"page\"><p>c</p></div>",
        );
        assert_eq!(count_html_pages(&generic), 3);

        let nested = wrap_rendered_html("<section><section><p>x</p></section></section>");
        assert_eq!(count_html_pages(&nested), 1);
    }

    #[test]
    fn wrappers_keep_fragment() {
        assert!(wrap_rendered_html("<section>x</section>").contains("<section>x</section>"));
        assert!(wrap_basic_html("<p>x</p>").starts_with("<div class=\"page\">"));
    }
}
