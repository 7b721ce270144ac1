// SPDX-License-Identifier: MPL-2.0
//! Preview pipeline tests against scripted engines.
//!
//! The engines below record every surface they create and remove so the
//! tests can check that no conversion tier leaks a surface.

use fluent_bundle::FluentValue;
use iced_preview::application::port::{
    DocumentRenderer, EngineResult, MarkupConverter, PageRasterizer, PdfDocument, PdfRasterizer,
    RasterPage, RenderOptions, RenderSurface, SurfaceFactory, SurfaceKind,
};
use iced_preview::application::preview::{
    convert_word_document, load, Engines, FileHandle, ObjectUrlRegistry, PreviewRequest,
};
use iced_preview::config::Config;
use iced_preview::domain::preview::{FileCategory, LoadedContent, StatusNote};
use iced_preview::error::{EngineError, PreviewError};
use iced_preview::i18n::fluent::I18n;
use iced_preview::infrastructure;
use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

// =============================================================================
// Scripted engines
// =============================================================================

#[derive(Debug, Default)]
struct SurfaceLog {
    created: Vec<SurfaceKind>,
    removed: usize,
    styles_injected: usize,
}

#[derive(Clone, Default)]
struct Surfaces {
    log: Arc<Mutex<SurfaceLog>>,
    detached_sections: usize,
    frame_sections: usize,
    settles: bool,
}

impl Surfaces {
    fn with_sections(detached: usize, frame: usize) -> Self {
        Self {
            detached_sections: detached,
            frame_sections: frame,
            settles: true,
            ..Self::default()
        }
    }

    fn created(&self) -> Vec<SurfaceKind> {
        self.log.lock().expect("log").created.clone()
    }

    fn removed(&self) -> usize {
        self.log.lock().expect("log").removed
    }
}

struct Surface {
    log: Arc<Mutex<SurfaceLog>>,
    sections: usize,
    settles: bool,
}

impl RenderSurface for Surface {
    fn page_sections(&self) -> usize {
        self.sections
    }

    fn force_visible(&mut self, index: usize) -> EngineResult<()> {
        if index < self.sections {
            Ok(())
        } else {
            Err(EngineError::new("no such section"))
        }
    }

    fn inject_reset_styles(&mut self) -> EngineResult<()> {
        self.log.lock().expect("log").styles_injected += 1;
        Ok(())
    }

    fn is_settled(&self) -> bool {
        self.settles
    }

    fn remove(&mut self) {
        self.log.lock().expect("log").removed += 1;
    }
}

impl SurfaceFactory for Surfaces {
    fn create(
        &self,
        kind: SurfaceKind,
        _width: u32,
        _height: u32,
    ) -> EngineResult<Box<dyn RenderSurface>> {
        self.log.lock().expect("log").created.push(kind);
        let sections = match kind {
            SurfaceKind::Detached => self.detached_sections,
            SurfaceKind::IsolatedFrame => self.frame_sections,
        };
        Ok(Box::new(Surface {
            log: Arc::clone(&self.log),
            sections,
            settles: self.settles,
        }))
    }
}

struct Renderer {
    layout_fails: bool,
    html: Option<&'static str>,
}

impl DocumentRenderer for Renderer {
    fn render_into(
        &self,
        _bytes: &[u8],
        _surface: &mut dyn RenderSurface,
        _options: &RenderOptions,
    ) -> EngineResult<()> {
        if self.layout_fails {
            Err(EngineError::new("layout crashed"))
        } else {
            Ok(())
        }
    }

    fn render_html(&self, _bytes: &[u8], _options: &RenderOptions) -> EngineResult<String> {
        self.html
            .map(str::to_string)
            .ok_or_else(|| EngineError::new("no html output"))
    }
}

/// Rasterizes 2x2 pages; `broken` sections fail.
struct Rasterizer {
    broken: Vec<usize>,
}

fn tiny_page() -> RasterPage {
    RasterPage {
        width: 2,
        height: 2,
        rgba: vec![255; 16],
    }
}

impl PageRasterizer for Rasterizer {
    fn rasterize(
        &self,
        _surface: &dyn RenderSurface,
        section: usize,
        _scale: f32,
        _page_size: (u32, u32),
    ) -> EngineResult<RasterPage> {
        if self.broken.contains(&section) {
            Err(EngineError::new("canvas tainted"))
        } else {
            Ok(tiny_page())
        }
    }
}

struct Markup {
    fails: bool,
}

impl MarkupConverter for Markup {
    fn convert_to_html(&self, _bytes: &[u8]) -> EngineResult<String> {
        if self.fails {
            Err(EngineError::new("not a package"))
        } else {
            Ok("<p>plain</p>".to_string())
        }
    }
}

fn engines(surfaces: &Surfaces, renderer: Renderer, markup_fails: bool) -> Engines {
    Engines::default()
        .with_surfaces(Arc::new(surfaces.clone()))
        .with_renderer(Arc::new(renderer))
        .with_rasterizer(Arc::new(Rasterizer { broken: Vec::new() }))
        .with_markup(Arc::new(Markup { fails: markup_fails }))
}

fn page_count(content: &LoadedContent) -> usize {
    match content {
        LoadedContent::Pages(pages) => pages.len(),
        other => panic!("expected page images, got {other:?}"),
    }
}

// =============================================================================
// Conversion chain
// =============================================================================

#[tokio::test(start_paused = true)]
async fn direct_rendering_caps_at_ten_pages() {
    let surfaces = Surfaces::with_sections(12, 0);
    let engines = engines(&surfaces, Renderer { layout_fails: false, html: None }, false);

    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(page_count(&converted.content), 10);
    assert_eq!(converted.status, StatusNote::DocxImages { pages: 10 });
    assert_eq!(surfaces.created(), vec![SurfaceKind::Detached]);
    assert_eq!(surfaces.removed(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_direct_rendering_falls_through_to_isolated_frame() {
    let surfaces = Surfaces::with_sections(0, 8);
    let engines = engines(&surfaces, Renderer { layout_fails: false, html: None }, false);

    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(page_count(&converted.content), 5);
    assert_eq!(converted.status, StatusNote::DocxFrame { pages: 5 });
    assert_eq!(
        surfaces.created(),
        vec![SurfaceKind::Detached, SurfaceKind::IsolatedFrame]
    );
    assert_eq!(surfaces.log.lock().expect("log").styles_injected, 1);
    assert_eq!(surfaces.removed(), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_sections_are_skipped_not_fatal() {
    let surfaces = Surfaces::with_sections(4, 0);
    let engines = Engines::default()
        .with_surfaces(Arc::new(surfaces.clone()))
        .with_renderer(Arc::new(Renderer { layout_fails: false, html: None }))
        .with_rasterizer(Arc::new(Rasterizer { broken: vec![1, 2] }));

    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(converted.status, StatusNote::DocxImages { pages: 2 });
    assert_eq!(surfaces.removed(), 1);
}

#[tokio::test(start_paused = true)]
async fn layout_failure_falls_back_to_enhanced_html() {
    let surfaces = Surfaces::with_sections(3, 3);
    let engines = engines(
        &surfaces,
        Renderer {
            layout_fails: true,
            html: Some("<section><p>a</p></section><section><p>b</p></section>"),
        },
        false,
    );

    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(converted.status, StatusNote::DocxHtml { pages: 2 });
    match converted.content {
        LoadedContent::Html(document) => {
            assert_eq!(document.page_count, 2);
            assert!(document.html.contains("<p>b</p>"));
        }
        other => panic!("expected html, got {other:?}"),
    }
    // Both image tiers created a surface, and both were torn down.
    assert_eq!(surfaces.created().len(), 2);
    assert_eq!(surfaces.removed(), 2);
}

#[tokio::test(start_paused = true)]
async fn minimal_markup_is_the_last_resort() {
    let surfaces = Surfaces::with_sections(0, 0);
    let engines = engines(&surfaces, Renderer { layout_fails: false, html: None }, false);

    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(converted.status, StatusNote::DocxBasic);
    match converted.content {
        LoadedContent::Html(document) => {
            assert_eq!(document.page_count, 1);
            assert!(document.html.contains("<p>plain</p>"));
        }
        other => panic!("expected html, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn all_tiers_failing_is_terminal() {
    let surfaces = Surfaces::with_sections(2, 2);
    let engines = engines(&surfaces, Renderer { layout_fails: true, html: None }, true);

    let err = convert_word_document(b"docx", &engines)
        .await
        .expect_err("every tier fails");

    match &err {
        PreviewError::TerminalFailure(detail) => {
            assert!(detail.contains("tier 1"));
            assert!(detail.contains("tier 4"));
        }
        other => panic!("expected terminal failure, got {other:?}"),
    }
    assert_eq!(err.i18n_key(), "error-preview-terminal");
    assert_eq!(surfaces.removed(), surfaces.created().len());
}

#[tokio::test(start_paused = true)]
async fn unsettled_surfaces_are_used_after_the_delay() {
    let mut surfaces = Surfaces::with_sections(2, 0);
    surfaces.settles = false;
    let engines = engines(&surfaces, Renderer { layout_fails: false, html: None }, false);

    let started = tokio::time::Instant::now();
    let converted = convert_word_document(b"docx", &engines).await.expect("converts");

    assert_eq!(converted.status, StatusNote::DocxImages { pages: 2 });
    assert!(started.elapsed() >= iced_preview::config::RENDER_SETTLE_DELAY);
    assert_eq!(surfaces.removed(), 1);
}

// =============================================================================
// Load dispatch with real files
// =============================================================================

struct Pdf {
    pages: usize,
}

struct PdfDoc {
    pages: usize,
}

impl PdfRasterizer for Pdf {
    fn open(&self, _bytes: &[u8]) -> EngineResult<Box<dyn PdfDocument>> {
        Ok(Box::new(PdfDoc { pages: self.pages }))
    }
}

impl PdfDocument for PdfDoc {
    fn page_count(&self) -> usize {
        self.pages
    }

    fn render_page(&mut self, _index: usize, _scale: f32) -> EngineResult<RasterPage> {
        Ok(tiny_page())
    }
}

fn docx_package(paragraph: &str) -> Vec<u8> {
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body><w:p><w:r><w:t>{paragraph}</w:t></w:r></w:p></w:body></w:document>"
    );
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .expect("start file");
        zip.write_all(xml.as_bytes()).expect("write part");
        zip.finish().expect("finish zip");
    }
    buffer.into_inner()
}

fn request(path: &std::path::Path) -> PreviewRequest {
    PreviewRequest::new(
        FileHandle::from_path(path).expect("handle"),
        FileCategory::Document,
    )
}

#[tokio::test(start_paused = true)]
async fn seven_page_pdf_shows_five_and_says_so() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, b"%PDF-1.7").expect("write");

    let engines = Engines::default().with_pdf(Arc::new(Pdf { pages: 7 }));
    let outcome = load(request(&path), engines, ObjectUrlRegistry::new())
        .await
        .expect("loads");

    assert_eq!(page_count(&outcome.content), 5);
    let note = outcome.status.expect("status note");
    assert_eq!(note, StatusNote::PdfTruncated { shown: 5, total: 7 });

    let i18n = I18n::new(Some("en-US".into()), &Config::default());
    let args: Vec<(&str, FluentValue<'_>)> = note
        .args()
        .into_iter()
        .map(|(name, value)| (name, value.into()))
        .collect();
    assert_eq!(i18n.tr_with_args(note.i18n_key(), &args), "5 of 7 pages");
}

#[tokio::test(start_paused = true)]
async fn builtin_engines_reach_the_basic_converter() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("letter.docx");
    std::fs::write(&path, docx_package("Dear reader")).expect("write");

    let outcome = load(
        request(&path),
        infrastructure::builtin_engines(),
        ObjectUrlRegistry::new(),
    )
    .await
    .expect("loads");

    assert_eq!(outcome.status, Some(StatusNote::DocxBasic));
    match outcome.content {
        LoadedContent::Html(document) => assert!(document.html.contains("Dear reader")),
        other => panic!("expected html, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn corrupt_docx_with_builtin_engines_is_terminal() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip").expect("write");

    let err = load(
        request(&path),
        infrastructure::builtin_engines(),
        ObjectUrlRegistry::new(),
    )
    .await
    .expect_err("nothing can render it");

    assert!(matches!(err, PreviewError::TerminalFailure(_)));
}

#[tokio::test]
async fn media_urls_are_registered_until_revoked() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("clip.mp4");
    std::fs::write(&path, [0_u8; 8]).expect("write");

    let urls = ObjectUrlRegistry::new();
    let request = PreviewRequest::new(
        FileHandle::from_path(&path).expect("handle"),
        FileCategory::Video,
    );
    let outcome = load(request, Engines::default(), urls.clone())
        .await
        .expect("loads");

    let url = outcome
        .content
        .object_url()
        .expect("media content has a url")
        .to_string();
    assert_eq!(urls.resolve(&url), Some(path));
    assert!(urls.revoke(&url));
    assert_eq!(urls.live_count(), 0);
}
