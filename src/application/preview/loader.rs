// SPDX-License-Identifier: MPL-2.0
//! Load dispatch: turns a preview request into [`LoadedContent`].

use super::conversion::convert_word_document;
use super::engines::Engines;
use super::file::FileHandle;
use super::object_url::ObjectUrlRegistry;
use super::pdf::rasterize_pdf;
use crate::domain::preview::{
    FileCategory, ImageSource, LoadedContent, MediaKind, MediaSource, PreviewKind, StatusNote,
};
use crate::error::PreviewError;
use std::path::PathBuf;

/// What to preview and how the caller classified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub file: FileHandle,
    pub category: FileCategory,
    /// Ready-made image to show instead of decoding the file itself.
    pub image_preview: Option<PathBuf>,
    /// Content shown for formats without a dedicated renderer.
    pub fallback_content: Option<String>,
}

impl PreviewRequest {
    #[must_use]
    pub fn new(file: FileHandle, category: FileCategory) -> Self {
        Self {
            file,
            category,
            image_preview: None,
            fallback_content: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> PreviewKind {
        PreviewKind::detect(self.category, &self.file.mime, &self.file.name)
    }
}

/// A successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub content: LoadedContent,
    pub status: Option<StatusNote>,
}

impl LoadOutcome {
    fn plain(content: LoadedContent) -> Self {
        Self {
            content,
            status: None,
        }
    }
}

async fn read_bytes(file: &FileHandle) -> Result<Vec<u8>, PreviewError> {
    tokio::fs::read(&file.path)
        .await
        .map_err(|err| PreviewError::ReadFailure(format!("{}: {}", file.name, err)))
}

/// Loads the content for `request`.
///
/// Media files get an object URL from `urls`; the caller owns it from then
/// on and must revoke it.
///
/// # Errors
///
/// Returns a [`PreviewError`] describing why nothing could be shown.
pub async fn load(
    request: PreviewRequest,
    engines: Engines,
    urls: ObjectUrlRegistry,
) -> Result<LoadOutcome, PreviewError> {
    let kind = request.kind();
    log::debug!("Loading {} as {:?}", request.file.name, kind);

    match kind {
        PreviewKind::Image => {
            let path = request
                .image_preview
                .clone()
                .unwrap_or_else(|| request.file.path.clone());
            let (width, height) = image_rs::image_dimensions(&path)
                .map_err(|err| PreviewError::ReadFailure(format!("{}: {}", path.display(), err)))?;
            Ok(LoadOutcome::plain(LoadedContent::Image(ImageSource {
                path,
                width,
                height,
            })))
        }
        PreviewKind::Audio | PreviewKind::Video => {
            let media_kind = if kind == PreviewKind::Audio {
                MediaKind::Audio
            } else {
                MediaKind::Video
            };
            let url = urls.create(&request.file.path);
            Ok(LoadOutcome::plain(LoadedContent::Media(MediaSource {
                url,
                path: request.file.path.clone(),
                kind: media_kind,
            })))
        }
        PreviewKind::Text => {
            let bytes = read_bytes(&request.file).await?;
            let text = String::from_utf8(bytes).map_err(|err| {
                PreviewError::ReadFailure(format!("{} is not UTF-8: {}", request.file.name, err))
            })?;
            Ok(LoadOutcome::plain(LoadedContent::Text(text)))
        }
        PreviewKind::Pdf => {
            let rasterizer = engines
                .pdf
                .clone()
                .ok_or_else(|| PreviewError::Unsupported("no PDF engine available".into()))?;
            let bytes = read_bytes(&request.file).await?;
            let (pages, note) = rasterize_pdf(&bytes, rasterizer.as_ref())?;
            Ok(LoadOutcome {
                content: LoadedContent::Pages(pages),
                status: Some(note),
            })
        }
        PreviewKind::WordDocument => {
            let bytes = read_bytes(&request.file).await?;
            let converted = convert_word_document(&bytes, &engines).await?;
            Ok(LoadOutcome {
                content: converted.content,
                status: Some(converted.status),
            })
        }
        PreviewKind::Other => Ok(LoadOutcome::plain(
            request
                .fallback_content
                .map(LoadedContent::Text)
                .unwrap_or(LoadedContent::Unsupported),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request_for(path: &std::path::Path, category: FileCategory) -> PreviewRequest {
        PreviewRequest::new(FileHandle::from_path(path).expect("handle"), category)
    }

    #[tokio::test]
    async fn text_files_are_read_whole() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("notes.csv");
        std::fs::write(&path, "a,b\n1,2\n").expect("failed to write");

        let outcome = load(
            request_for(&path, FileCategory::Document),
            Engines::default(),
            ObjectUrlRegistry::new(),
        )
        .await
        .expect("text loads");

        assert_eq!(outcome.content, LoadedContent::Text("a,b\n1,2\n".into()));
        assert!(outcome.status.is_none());
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_read_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("failed to write");

        let err = load(
            request_for(&path, FileCategory::Document),
            Engines::default(),
            ObjectUrlRegistry::new(),
        )
        .await
        .expect_err("decode fails");
        assert!(matches!(err, PreviewError::ReadFailure(_)));
    }

    #[tokio::test]
    async fn media_gets_an_object_url() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"ID3").expect("failed to write");
        let urls = ObjectUrlRegistry::new();

        let outcome = load(
            request_for(&path, FileCategory::Audio),
            Engines::default(),
            urls.clone(),
        )
        .await
        .expect("media loads");

        let LoadedContent::Media(media) = outcome.content else {
            panic!("expected media content");
        };
        assert_eq!(media.kind, MediaKind::Audio);
        assert_eq!(urls.resolve(&media.url), Some(path));
    }

    #[tokio::test]
    async fn unknown_format_uses_fallback_or_unsupported() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("archive.zip");
        std::fs::write(&path, b"PK").expect("failed to write");

        let mut request = request_for(&path, FileCategory::Document);
        let outcome = load(request.clone(), Engines::default(), ObjectUrlRegistry::new())
            .await
            .expect("fallback loads");
        assert_eq!(outcome.content, LoadedContent::Unsupported);

        request.fallback_content = Some("3 files".into());
        let outcome = load(request, Engines::default(), ObjectUrlRegistry::new())
            .await
            .expect("fallback loads");
        assert_eq!(outcome.content, LoadedContent::Text("3 files".into()));
    }

    #[tokio::test]
    async fn pdf_without_engine_is_unsupported() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.7").expect("failed to write");

        let err = load(
            request_for(&path, FileCategory::Document),
            Engines::default(),
            ObjectUrlRegistry::new(),
        )
        .await
        .expect_err("no engine");
        assert!(matches!(err, PreviewError::Unsupported(_)));
    }

    #[tokio::test]
    async fn images_report_dimensions() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("dot.png");
        image_rs::RgbaImage::new(3, 2)
            .save(&path)
            .expect("failed to write png");

        let outcome = load(
            request_for(&path, FileCategory::Image),
            Engines::default(),
            ObjectUrlRegistry::new(),
        )
        .await
        .expect("image loads");
        let LoadedContent::Image(image) = outcome.content else {
            panic!("expected image content");
        };
        assert_eq!((image.width, image.height), (3, 2));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("gone.txt");
        std::fs::write(&path, "x").expect("failed to write");
        let request = request_for(&path, FileCategory::Document);
        std::fs::remove_file(&path).expect("failed to remove");

        let err = load(request, Engines::default(), ObjectUrlRegistry::new())
            .await
            .expect_err("file vanished");
        assert!(matches!(err, PreviewError::ReadFailure(_)));
    }
}
