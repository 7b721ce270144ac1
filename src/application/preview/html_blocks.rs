// SPDX-License-Identifier: MPL-2.0
//! Flattens converted document HTML into pages of simple text blocks.
//!
//! The preview does not embed a browser engine. Converted documents are
//! reduced to headings, paragraphs, table rows, rules and image
//! placeholders, grouped by the element that marks each page. Inline
//! formatting is dropped.

use crate::domain::preview::page_tracking::{self, ElementMarker};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Row(Vec<String>),
    Rule,
    Image { alt: String },
}

/// Blocks belonging to one page. Content outside any page marker lands in
/// an unmarked page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlPage {
    pub marker: Option<ElementMarker>,
    pub blocks: Vec<Block>,
}

// =============================================================================
// Tag scanning
// =============================================================================

#[derive(Debug)]
struct Tag<'a> {
    name: String,
    closing: bool,
    self_closing: bool,
    attributes: Vec<(String, Cow<'a, str>)>,
}

impl Tag<'_> {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_ref())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    fn page_marker(&self) -> Option<ElementMarker> {
        if self.name == "section" {
            Some(ElementMarker::Section)
        } else if self.has_class("page-wrapper") {
            Some(ElementMarker::Wrapper)
        } else if self.attribute("data-page").is_some() || self.attribute("data-page-number").is_some() {
            Some(ElementMarker::DataPage)
        } else if self.has_class("page") {
            Some(ElementMarker::GenericPage)
        } else {
            None
        }
    }
}

const VOID_ELEMENTS: [&str; 8] = ["br", "hr", "img", "meta", "link", "input", "col", "wbr"];

fn parse_tag(inner: &str) -> Option<Tag<'_>> {
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let self_closing = rest.trim_end().ends_with('/');
    let rest = rest.trim_end().trim_end_matches('/');

    let name_end = rest
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let name = rest[..name_end].to_ascii_lowercase();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }

    let mut attributes = Vec::new();
    let bytes = rest.as_bytes();
    let mut i = name_end;
    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        if key_start == i {
            i += 1;
            continue;
        }
        let key = rest[key_start..i].to_ascii_lowercase();
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let value = if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            let (start, end) = match bytes.get(i) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    let start = i + 1;
                    let end = rest[start..]
                        .find(char::from(quote))
                        .map_or(rest.len(), |offset| start + offset);
                    i = (end + 1).min(rest.len());
                    (start, end)
                }
                _ => {
                    let start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    (start, i)
                }
            };
            decode_entities(&rest[start..end])
        } else {
            Cow::Borrowed("")
        };
        attributes.push((key, value));
    }

    Some(Tag {
        self_closing: self_closing || VOID_ELEMENTS.contains(&name.as_str()),
        name,
        closing,
        attributes,
    })
}

fn decode_entities(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape_with(raw, |entity| match entity {
        "nbsp" => Some("\u{a0}"),
        "apos" => Some("'"),
        _ => None,
    })
    .unwrap_or(Cow::Borrowed(raw))
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div"
            | "section"
            | "article"
            | "li"
            | "ul"
            | "ol"
            | "table"
            | "blockquote"
            | "pre"
            | "header"
            | "footer"
            | "body"
    )
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Default)]
struct Builder {
    pages: Vec<HtmlPage>,
    current: HtmlPage,
    /// Stack depth at which the current marked page opened.
    page_depth: Option<usize>,
    stack: Vec<String>,
    buffer: String,
    heading: Option<u8>,
    row: Option<Vec<String>>,
    cell: Option<String>,
    skip_depth: Option<usize>,
}

impl Builder {
    fn push_text(&mut self, text: &str) {
        if self.skip_depth.is_some() {
            return;
        }
        let decoded = decode_entities(text);
        for (index, word) in decoded.split_ascii_whitespace().enumerate() {
            let starts_with_space = decoded.starts_with(|c: char| c.is_ascii_whitespace());
            if (index > 0 || starts_with_space)
                && !self.buffer.is_empty()
                && !self.buffer.ends_with(['\n', ' '])
            {
                self.buffer.push(' ');
            }
            self.buffer.push_str(word);
        }
        if decoded.ends_with(|c: char| c.is_ascii_whitespace()) && !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
    }

    fn flush(&mut self) {
        let text = self
            .buffer
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        self.buffer.clear();
        if text.is_empty() {
            return;
        }
        if let Some(cell) = self.cell.as_mut() {
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(&text);
        } else if let Some(level) = self.heading {
            self.current.blocks.push(Block::Heading { level, text });
        } else {
            self.current.blocks.push(Block::Paragraph(text));
        }
    }

    fn finish_page(&mut self) {
        self.flush();
        let page = std::mem::take(&mut self.current);
        if page.marker.is_some() || !page.blocks.is_empty() {
            self.pages.push(page);
        }
        self.page_depth = None;
    }

    fn open(&mut self, tag: &Tag<'_>) {
        if self.skip_depth.is_some() {
            if !tag.self_closing {
                self.stack.push(tag.name.clone());
            }
            return;
        }

        match tag.name.as_str() {
            "br" => self.buffer.push('\n'),
            "hr" => {
                self.flush();
                self.current.blocks.push(Block::Rule);
            }
            "img" => {
                self.flush();
                let alt = tag.attribute("alt").unwrap_or_default().to_string();
                self.current.blocks.push(Block::Image { alt });
            }
            "tr" => {
                self.flush();
                self.row = Some(Vec::new());
            }
            "td" | "th" => {
                self.flush();
                self.cell = Some(String::new());
            }
            name => {
                if let Some(level) = heading_level(name) {
                    self.flush();
                    self.heading = Some(level);
                } else if is_block(name) {
                    self.flush();
                }
            }
        }

        if tag.self_closing {
            return;
        }
        self.stack.push(tag.name.clone());

        if matches!(tag.name.as_str(), "script" | "style" | "head") {
            self.skip_depth = Some(self.stack.len());
            return;
        }

        if self.page_depth.is_none() {
            if let Some(marker) = tag.page_marker() {
                self.finish_page();
                self.current.marker = Some(marker);
                self.page_depth = Some(self.stack.len());
            }
        }
    }

    fn close(&mut self, name: &str) {
        let Some(position) = self.stack.iter().rposition(|open| open == name) else {
            return;
        };
        let depth = position + 1;
        self.stack.truncate(position);

        if let Some(skip) = self.skip_depth {
            if depth <= skip {
                self.skip_depth = None;
            }
            return;
        }

        match name {
            "td" | "th" => {
                self.flush();
                if let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) {
                    row.push(cell);
                }
            }
            "tr" => {
                self.flush();
                self.cell = None;
                if let Some(row) = self.row.take().filter(|row| !row.is_empty()) {
                    self.current.blocks.push(Block::Row(row));
                }
            }
            _ if heading_level(name).is_some() => {
                self.flush();
                self.heading = None;
            }
            _ if is_block(name) => self.flush(),
            _ => {}
        }

        if self.page_depth.is_some_and(|page| depth <= page) {
            self.finish_page();
        }
    }

    fn finish(mut self) -> Vec<HtmlPage> {
        self.finish_page();
        if self.pages.is_empty() {
            self.pages.push(HtmlPage::default());
        }
        self.pages
    }
}

/// Number of pages `pages` present to navigation and page tracking.
#[must_use]
pub fn page_total(pages: &[HtmlPage]) -> usize {
    page_tracking::page_total(pages.iter().map(|page| page.marker.as_ref()), "")
}

/// Splits `html` into pages of blocks.
#[must_use]
pub fn parse(html: &str) -> Vec<HtmlPage> {
    let mut builder = Builder::default();
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        builder.push_text(&rest[..open]);
        rest = &rest[open..];

        if let Some(comment) = rest.strip_prefix("<!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }
        let Some(close) = rest.find('>') else {
            builder.push_text(rest);
            rest = "";
            break;
        };
        let inner = &rest[1..close];
        rest = &rest[close + 1..];

        if inner.starts_with('!') || inner.starts_with('?') {
            continue;
        }
        match parse_tag(inner) {
            Some(tag) if tag.closing => builder.close(&tag.name),
            Some(tag) => builder.open(&tag),
            None => builder.push_text(&format!("<{inner}>")),
        }
    }
    builder.push_text(rest);
    builder.finish()
}
