// SPDX-License-Identifier: MPL-2.0
//! What a preview session shows, and how a file is classified.

use std::path::{Path, PathBuf};
use std::sync::Arc;

// =============================================================================
// FileCategory
// =============================================================================

/// Coarse category declared by whoever opens the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Image,
    Document,
    Audio,
    Video,
}

impl FileCategory {
    pub const ALL: [FileCategory; 4] = [
        FileCategory::Image,
        FileCategory::Document,
        FileCategory::Audio,
        FileCategory::Video,
    ];

    /// Parses the `--type` command-line value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "image" => Some(FileCategory::Image),
            "document" | "doc" => Some(FileCategory::Document),
            "audio" => Some(FileCategory::Audio),
            "video" => Some(FileCategory::Video),
            _ => None,
        }
    }

    /// Infers a category from a MIME type; unknown types are documents.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileCategory::Image
        } else if mime.starts_with("audio/") {
            FileCategory::Audio
        } else if mime.starts_with("video/") {
            FileCategory::Video
        } else {
            FileCategory::Document
        }
    }

    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            FileCategory::Image => "file-category-image",
            FileCategory::Document => "file-category-document",
            FileCategory::Audio => "file-category-audio",
            FileCategory::Video => "file-category-video",
        }
    }
}

// =============================================================================
// PreviewKind
// =============================================================================

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_CSV: &str = "text/csv";

/// Rendering strategy chosen for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Audio,
    Video,
    Text,
    Pdf,
    WordDocument,
    Other,
}

impl PreviewKind {
    /// Picks the strategy: declared category first, then MIME type, then
    /// file extension.
    #[must_use]
    pub fn detect(category: FileCategory, mime: &str, name: &str) -> Self {
        match category {
            FileCategory::Image => return PreviewKind::Image,
            FileCategory::Audio => return PreviewKind::Audio,
            FileCategory::Video => return PreviewKind::Video,
            FileCategory::Document => {}
        }

        let mime = mime.to_ascii_lowercase();
        let extension = extension_of(name);

        if mime == MIME_TEXT || mime == MIME_CSV || matches!(extension.as_str(), "txt" | "csv") {
            PreviewKind::Text
        } else if mime == MIME_PDF || extension == "pdf" {
            PreviewKind::Pdf
        } else if mime == MIME_DOCX || mime == MIME_DOC || matches!(extension.as_str(), "docx" | "doc")
        {
            PreviewKind::WordDocument
        } else {
            PreviewKind::Other
        }
    }

    #[must_use]
    pub fn is_media(self) -> bool {
        matches!(self, PreviewKind::Audio | PreviewKind::Video)
    }

    /// Kinds whose content scales with the document zoom.
    #[must_use]
    pub fn is_document(self) -> bool {
        matches!(
            self,
            PreviewKind::Text | PreviewKind::Pdf | PreviewKind::WordDocument | PreviewKind::Other
        )
    }
}

/// Lowercased extension of a file name, empty when absent.
#[must_use]
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default()
}

// =============================================================================
// Loaded content
// =============================================================================

/// An image shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// A playable file bound to a transient object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub url: String,
    pub path: PathBuf,
    pub kind: MediaKind,
}

/// One rasterized page, PNG encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub png: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

/// An HTML fragment with its page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub html: String,
    pub page_count: usize,
}

/// Result of a successful load, one variant per rendering branch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedContent {
    Image(ImageSource),
    Media(MediaSource),
    Pages(Vec<PageImage>),
    Html(HtmlDocument),
    Text(String),
    Unsupported,
}

impl LoadedContent {
    /// Number of pages the content presents.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match self {
            LoadedContent::Pages(pages) => pages.len(),
            LoadedContent::Html(document) => document.page_count.max(1),
            LoadedContent::Image(_) | LoadedContent::Text(_) => 1,
            LoadedContent::Media(_) | LoadedContent::Unsupported => 0,
        }
    }

    /// The object URL owned by this content, if any.
    #[must_use]
    pub fn object_url(&self) -> Option<&str> {
        match self {
            LoadedContent::Media(media) => Some(&media.url),
            _ => None,
        }
    }
}

// =============================================================================
// Status notes
// =============================================================================

/// Which strategy produced the content, surfaced as a localized note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusNote {
    PdfPages { shown: usize },
    PdfTruncated { shown: usize, total: usize },
    DocxImages { pages: usize },
    DocxFrame { pages: usize },
    DocxHtml { pages: usize },
    DocxBasic,
}

impl StatusNote {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            StatusNote::PdfPages { .. } => "preview-status-pdf-pages",
            StatusNote::PdfTruncated { .. } => "preview-status-pdf-truncated",
            StatusNote::DocxImages { .. } => "preview-status-docx-images",
            StatusNote::DocxFrame { .. } => "preview-status-docx-frame",
            StatusNote::DocxHtml { .. } => "preview-status-docx-html",
            StatusNote::DocxBasic => "preview-status-docx-basic",
        }
    }

    /// Named arguments of the localized message.
    #[must_use]
    pub fn args(self) -> Vec<(&'static str, usize)> {
        match self {
            StatusNote::PdfPages { shown } => vec![("shown", shown)],
            StatusNote::PdfTruncated { shown, total } => vec![("shown", shown), ("total", total)],
            StatusNote::DocxImages { pages }
            | StatusNote::DocxFrame { pages }
            | StatusNote::DocxHtml { pages } => vec![("pages", pages)],
            StatusNote::DocxBasic => Vec::new(),
        }
    }

    /// Conversion tier (1-4) for word documents.
    #[must_use]
    pub fn tier(self) -> Option<u8> {
        match self {
            StatusNote::DocxImages { .. } => Some(1),
            StatusNote::DocxFrame { .. } => Some(2),
            StatusNote::DocxHtml { .. } => Some(3),
            StatusNote::DocxBasic => Some(4),
            StatusNote::PdfPages { .. } | StatusNote::PdfTruncated { .. } => None,
        }
    }
}

// =============================================================================
// Load lifecycle
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Identifies one load request; results carrying an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadGeneration(u64);

impl LoadGeneration {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}
