// SPDX-License-Identifier: MPL-2.0
//! Minimal `.docx` to HTML converter implementing [`MarkupConverter`].
//!
//! Reads `word/document.xml` out of the OOXML package and streams it with
//! `quick-xml`, keeping only paragraphs, headings, bold/italic runs, line and
//! page breaks, and simple tables. Layout, images and styles are dropped;
//! this is the last resort of the conversion chain.
//!
//! [`MarkupConverter`]: crate::application::port::MarkupConverter

use crate::application::port::{EngineResult, MarkupConverter};
use crate::error::EngineError;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Cursor, Read};

const DOCUMENT_PART: &str = "word/document.xml";

/// Separator emitted for explicit page breaks.
pub const PAGE_BREAK_HTML: &str = "<hr class=\"page-break\">";

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxMarkupConverter;

impl DocxMarkupConverter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MarkupConverter for DocxMarkupConverter {
    fn convert_to_html(&self, bytes: &[u8]) -> EngineResult<String> {
        let xml = read_document_part(bytes)?;
        document_xml_to_html(&xml)
    }
}

fn read_document_part(bytes: &[u8]) -> EngineResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| EngineError::new(format!("not an OOXML package: {err}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|err| EngineError::new(format!("{DOCUMENT_PART}: {err}")))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Paragraph being assembled.
#[derive(Debug, Default)]
struct Paragraph {
    heading: Option<u8>,
    body: String,
}

impl Paragraph {
    fn finish(self, out: &mut String) {
        match self.heading {
            Some(level) => out.push_str(&format!("<h{level}>{}</h{level}>", self.body)),
            None if self.body.is_empty() => out.push_str("<p><br></p>"),
            None => out.push_str(&format!("<p>{}</p>", self.body)),
        }
        out.push('\n');
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RunStyle {
    bold: bool,
    italic: bool,
}

impl RunStyle {
    fn wrap(self, text: &str) -> String {
        let mut html = escape(text).into_owned();
        if self.italic {
            html = format!("<em>{html}</em>");
        }
        if self.bold {
            html = format!("<strong>{html}</strong>");
        }
        html
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

/// Toggle properties like `<w:b/>` are on unless `w:val` says otherwise.
fn toggle_enabled(element: &BytesStart<'_>) -> bool {
    !matches!(
        attribute(element, b"w:val").as_deref(),
        Some("false" | "0" | "off")
    )
}

/// Heading level for paragraph styles named `Heading1`..`Heading6` or `Title`.
fn heading_level(style: &str) -> Option<u8> {
    let lower = style.to_ascii_lowercase();
    if lower == "title" {
        return Some(1);
    }
    lower
        .strip_prefix("heading")
        .and_then(|level| level.trim().parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

/// Converts the main document part to an HTML body fragment.
///
/// # Errors
///
/// Returns an [`EngineError`] if the XML is malformed.
pub fn document_xml_to_html(xml: &str) -> EngineResult<String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut paragraph: Option<Paragraph> = None;
    let mut style = RunStyle::default();
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| EngineError::new(format!("malformed document XML: {err}")))?;
        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                let is_empty = matches!(event, Event::Empty(_));
                match element.name().as_ref() {
                    b"w:p" if !is_empty => paragraph = Some(Paragraph::default()),
                    b"w:p" => Paragraph::default().finish(&mut out),
                    b"w:pStyle" => {
                        if let (Some(current), Some(value)) =
                            (paragraph.as_mut(), attribute(element, b"w:val"))
                        {
                            current.heading = heading_level(&value);
                        }
                    }
                    b"w:r" => style = RunStyle::default(),
                    b"w:b" => style.bold = toggle_enabled(element),
                    b"w:i" => style.italic = toggle_enabled(element),
                    b"w:t" => in_text = !is_empty,
                    b"w:tab" => {
                        if let Some(current) = paragraph.as_mut() {
                            current.body.push(' ');
                        }
                    }
                    b"w:br" => {
                        if attribute(element, b"w:type").as_deref() == Some("page") {
                            if let Some(current) = paragraph.take() {
                                current.finish(&mut out);
                                paragraph = Some(Paragraph::default());
                            }
                            out.push_str(PAGE_BREAK_HTML);
                            out.push('\n');
                        } else if let Some(current) = paragraph.as_mut() {
                            current.body.push_str("<br>");
                        }
                    }
                    b"w:tbl" if !is_empty => out.push_str("<table>\n"),
                    b"w:tr" if !is_empty => out.push_str("<tr>"),
                    b"w:tc" if !is_empty => out.push_str("<td>"),
                    _ => {}
                }
            }
            Event::Text(text) if in_text => {
                let value = text
                    .unescape()
                    .map_err(|err| EngineError::new(format!("bad text run: {err}")))?;
                if let Some(current) = paragraph.as_mut() {
                    current.body.push_str(&style.wrap(&value));
                }
            }
            Event::End(element) => match element.name().as_ref() {
                b"w:p" => {
                    if let Some(current) = paragraph.take() {
                        current.finish(&mut out);
                    }
                }
                b"w:t" => in_text = false,
                b"w:tbl" => out.push_str("</table>\n"),
                b"w:tr" => out.push_str("</tr>\n"),
                b"w:tc" => out.push_str("</td>"),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}
