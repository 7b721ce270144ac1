// SPDX-License-Identifier: MPL-2.0
//! Scrollable page view for PDF pages, converted documents and text.
//!
//! Page sheets are laid out with fixed heights so the positions recorded in
//! [`LaidOutPages`] match what the scrollable actually shows. Scroll events
//! feed a throttled page-visibility evaluation; navigation snaps the
//! scrollable to the top of a page.

use crate::application::preview::html_blocks::{self, Block};
use crate::domain::preview::page_tracking::{
    page_elements, page_total, visible_page, ElementMarker, Extent, LaidOutPages, PageElement, ScrollThrottle,
};
use crate::domain::preview::{DocumentZoom, LoadedContent, PageImage};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles::container as container_styles;
use iced::widget::image::Handle;
use iced::widget::scrollable::{RelativeOffset, Viewport};
use iced::widget::{image, operation, rule, text, Column, Container, Id, Row, Scrollable, Text};
use iced::{alignment, Element, Font, Length, Task};
use std::time::Instant;

const SCROLLABLE_ID: &str = "preview-document";

/// Average glyph width relative to the font size, used to estimate wrapping.
const GLYPH_WIDTH_RATIO: f32 = 0.55;

const BLOCK_SPACING: f32 = spacing::SM;

/// Scroll position reported by the scrollable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSnapshot {
    pub offset: f32,
    pub height: f32,
    pub content_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Scrolled(ViewportSnapshot),
    ZoomIn,
    ZoomOut,
    ResetZoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The most visible page changed to this one-based index.
    PageVisible(usize),
    ZoomChanged,
}

#[derive(Debug, Clone)]
enum SheetContent {
    Image(Handle),
    Blocks(Vec<Block>),
}

/// One page as laid out at zoom 1.
#[derive(Debug, Clone)]
struct Sheet {
    content: SheetContent,
    height: f32,
    marker: Option<ElementMarker>,
}

#[derive(Debug, Clone)]
enum Body {
    Sheets(Vec<Sheet>),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct State {
    body: Body,
    zoom: DocumentZoom,
    viewport: Option<ViewportSnapshot>,
    throttle: ScrollThrottle,
    page_word: String,
    last_visible: Option<usize>,
}

impl State {
    /// Builds the view for document content; `None` for other content.
    /// `page_word` is the localized word for "page".
    #[must_use]
    pub fn new(content: &LoadedContent, page_word: impl Into<String>) -> Option<Self> {
        let page_word = page_word.into();
        let body = match content {
            LoadedContent::Pages(pages) => Body::Sheets(image_sheets(pages, &page_word)),
            LoadedContent::Html(document) => Body::Sheets(
                html_blocks::parse(&document.html)
                    .into_iter()
                    .map(|page| Sheet {
                        height: estimate_page_height(&page.blocks),
                        content: SheetContent::Blocks(page.blocks),
                        marker: page.marker,
                    })
                    .collect(),
            ),
            LoadedContent::Text(text) => Body::Text(text.clone()),
            _ => return None,
        };
        Some(Self {
            body,
            zoom: DocumentZoom::default(),
            viewport: None,
            throttle: ScrollThrottle::default(),
            page_word,
            last_visible: None,
        })
    }

    #[must_use]
    pub fn zoom(&self) -> DocumentZoom {
        self.zoom
    }

    /// Pages reachable by navigation; text is a single page.
    #[must_use]
    pub fn page_total(&self) -> usize {
        match &self.body {
            Body::Sheets(sheets) => page_total(
                sheets.iter().map(|sheet| sheet.marker.as_ref()),
                &self.page_word,
            ),
            Body::Text(_) => 1,
        }
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Effect {
        match message {
            Message::Scrolled(snapshot) => {
                self.viewport = Some(snapshot);
                if self.throttle.on_scroll(now) {
                    self.evaluate()
                } else {
                    Effect::None
                }
            }
            Message::ZoomIn => self.set_zoom(self.zoom.zoom_in()),
            Message::ZoomOut => self.set_zoom(self.zoom.zoom_out()),
            Message::ResetZoom => self.set_zoom(DocumentZoom::default()),
        }
    }

    /// Runs a trailing evaluation queued by the throttle.
    pub fn tick(&mut self, now: Instant) -> Effect {
        if self.throttle.flush(now) {
            self.evaluate()
        } else {
            Effect::None
        }
    }

    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.throttle.has_pending()
    }

    fn set_zoom(&mut self, zoom: DocumentZoom) -> Effect {
        if zoom == self.zoom {
            return Effect::None;
        }
        self.zoom = zoom;
        Effect::ZoomChanged
    }

    fn evaluate(&mut self) -> Effect {
        let page = visible_page(&self.laid_out(), &self.page_word);
        match page {
            Some(page) if self.last_visible != Some(page) => {
                self.last_visible = Some(page);
                Effect::PageVisible(page)
            }
            _ => Effect::None,
        }
    }

    /// Current layout as a scroll container for page tracking.
    #[must_use]
    pub fn laid_out(&self) -> LaidOutPages {
        let viewport = self
            .viewport
            .map_or(Extent::default(), |snapshot| Extent::new(snapshot.offset, snapshot.height));
        let elements = match &self.body {
            Body::Sheets(sheets) => layout(sheets, self.zoom.value())
                .into_iter()
                .zip(sheets)
                .filter_map(|(extent, sheet)| {
                    sheet.marker.clone().map(|marker| PageElement { extent, marker })
                })
                .collect(),
            Body::Text(_) => Vec::new(),
        };
        LaidOutPages { viewport, elements }
    }

    /// Snaps the scrollable to the top of the one-based `page`.
    pub fn scroll_to_page(&mut self, page: usize) -> Task<Message> {
        let Body::Sheets(sheets) = &self.body else {
            return Task::none();
        };
        let extents = layout(sheets, self.zoom.value());
        let tracked = page_elements(&self.laid_out(), &self.page_word);
        let target = if tracked.is_empty() { extents } else { tracked };
        let Some(top) = page.checked_sub(1).and_then(|index| target.get(index)).map(|e| e.top)
        else {
            return Task::none();
        };

        let content_height = content_height(sheets, self.zoom.value());
        let viewport_height = self.viewport.map_or(0.0, |snapshot| snapshot.height);
        let max_offset = (content_height - viewport_height).max(0.0);
        let offset = top.clamp(0.0, max_offset);

        self.viewport = Some(ViewportSnapshot {
            offset,
            height: viewport_height,
            content_height,
        });
        self.last_visible = Some(page);

        let relative_y = if max_offset > 0.0 { offset / max_offset } else { 0.0 };
        operation::snap_to(Id::new(SCROLLABLE_ID), RelativeOffset { x: 0.0, y: relative_y })
    }

    pub fn view(&self) -> Element<'_, Message> {
        let zoom = self.zoom.value();
        let pages: Element<'_, Message> = match &self.body {
            Body::Sheets(sheets) => Column::with_children(sheets.iter().map(|sheet| sheet_view(sheet, zoom)))
                .spacing(sizing::PAGE_GAP)
                .padding(spacing::LG)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .into(),
            Body::Text(body) => Container::new(
                Text::new(body.as_str())
                    .font(Font::MONOSPACE)
                    .size(typography::DOCUMENT_BODY * zoom),
            )
            .width(Length::Fixed(sizing::PAGE_DISPLAY_WIDTH * zoom))
            .padding(sizing::PAGE_PADDING * zoom)
            .style(container_styles::page)
            .into(),
        };

        let scrollable = Scrollable::new(
            Container::new(pages)
                .width(Length::Fill)
                .padding(if matches!(self.body, Body::Text(_)) { spacing::LG } else { 0.0 })
                .center_x(Length::Fill),
        )
        .id(Id::new(SCROLLABLE_ID))
        .width(Length::Fill)
        .height(Length::Fill)
        .on_scroll(|viewport: Viewport| {
            Message::Scrolled(ViewportSnapshot {
                offset: viewport.absolute_offset().y,
                height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
        });

        Container::new(scrollable)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container_styles::canvas_area)
            .into()
    }
}

// =============================================================================
// Layout
// =============================================================================

fn image_sheets(pages: &[PageImage], page_word: &str) -> Vec<Sheet> {
    pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let height = if page.width > 0 {
                sizing::PAGE_DISPLAY_WIDTH * page.height as f32 / page.width as f32
            } else {
                sizing::PAGE_MIN_HEIGHT
            };
            Sheet {
                content: SheetContent::Image(Handle::from_bytes(page.png.as_ref().clone())),
                height,
                marker: Some(ElementMarker::Image {
                    alt: format!("{} {}", page_word, index + 1),
                }),
            }
        })
        .collect()
}

/// Page extents in content coordinates at `zoom`.
fn layout(sheets: &[Sheet], zoom: f32) -> Vec<Extent> {
    let mut top = spacing::LG;
    sheets
        .iter()
        .map(|sheet| {
            let extent = Extent::new(top, sheet.height * zoom);
            top = extent.bottom() + sizing::PAGE_GAP;
            extent
        })
        .collect()
}

fn content_height(sheets: &[Sheet], zoom: f32) -> f32 {
    layout(sheets, zoom)
        .last()
        .map_or(0.0, |last| last.bottom() + spacing::LG)
}

fn heading_size(level: u8) -> f32 {
    let scale = match level {
        1 => 2.0,
        2 => 1.6,
        3 => 1.3,
        _ => 1.1,
    };
    typography::DOCUMENT_BODY * scale
}

/// Lines `text` wraps to within `width` at font `size`.
fn wrapped_lines(text: &str, size: f32, width: f32) -> usize {
    let per_line = (width / (size * GLYPH_WIDTH_RATIO)).floor().max(1.0) as usize;
    text.lines()
        .map(|line| line.chars().count().div_ceil(per_line).max(1))
        .sum::<usize>()
        .max(1)
}

fn text_height(lines: usize, size: f32) -> f32 {
    lines as f32 * size * typography::DOCUMENT_LINE_HEIGHT
}

fn block_height(block: &Block, width: f32) -> f32 {
    let body = typography::DOCUMENT_BODY;
    match block {
        Block::Heading { level, text } => {
            let size = heading_size(*level);
            text_height(wrapped_lines(text, size, width), size)
        }
        Block::Paragraph(text) => text_height(wrapped_lines(text, body, width), body),
        Block::Row(cells) => {
            let cell_width = width / cells.len().max(1) as f32;
            let lines = cells
                .iter()
                .map(|cell| wrapped_lines(cell, body, cell_width))
                .max()
                .unwrap_or(1);
            text_height(lines, body)
        }
        Block::Rule => 1.0,
        Block::Image { alt } => text_height(wrapped_lines(alt, body, width), body),
    }
}

/// Height of an HTML page at zoom 1, never below the minimum sheet height.
fn estimate_page_height(blocks: &[Block]) -> f32 {
    let width = sizing::PAGE_DISPLAY_WIDTH - 2.0 * sizing::PAGE_PADDING;
    let content: f32 = blocks.iter().map(|block| block_height(block, width)).sum();
    let gaps = blocks.len().saturating_sub(1) as f32 * BLOCK_SPACING;
    // One spare line absorbs wrapping estimates that come up short.
    let slack = text_height(1, typography::DOCUMENT_BODY);
    (content + gaps + slack + 2.0 * sizing::PAGE_PADDING).max(sizing::PAGE_MIN_HEIGHT)
}

// =============================================================================
// Rendering
// =============================================================================

fn sheet_view(sheet: &Sheet, zoom: f32) -> Element<'_, Message> {
    let width = sizing::PAGE_DISPLAY_WIDTH * zoom;
    let height = sheet.height * zoom;

    match &sheet.content {
        SheetContent::Image(handle) => Container::new(
            image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height)),
        )
        .style(container_styles::page)
        .into(),
        SheetContent::Blocks(blocks) => {
            let column = Column::with_children(blocks.iter().map(|block| block_view(block, zoom)))
                .spacing(BLOCK_SPACING * zoom);
            Container::new(column)
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .padding(sizing::PAGE_PADDING * zoom)
                .clip(true)
                .style(container_styles::page)
                .into()
        }
    }
}

fn document_text(content: &str, size: f32) -> Text<'_> {
    Text::new(content)
        .size(size)
        .line_height(text::LineHeight::Relative(typography::DOCUMENT_LINE_HEIGHT))
}

fn block_view(block: &Block, zoom: f32) -> Element<'_, Message> {
    let body = typography::DOCUMENT_BODY * zoom;
    match block {
        Block::Heading { level, text } => document_text(text, heading_size(*level) * zoom)
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            })
            .into(),
        Block::Paragraph(text) => document_text(text, body).into(),
        Block::Row(cells) => Row::with_children(cells.iter().map(|cell| {
            Container::new(document_text(cell, body))
                .width(Length::FillPortion(1))
                .into()
        }))
        .width(Length::Fill)
        .into(),
        Block::Rule => rule::horizontal(1).into(),
        Block::Image { alt } => document_text(alt, body)
            .font(Font {
                style: iced::font::Style::Italic,
                ..Font::DEFAULT
            })
            .into(),
    }
}
