// SPDX-License-Identifier: MPL-2.0
//! The file being previewed.

use crate::domain::preview::content::{
    extension_of, FileCategory, MIME_CSV, MIME_DOC, MIME_DOCX, MIME_PDF, MIME_TEXT,
};
use std::io;
use std::path::{Path, PathBuf};

/// Name, size, MIME type and location of a file to preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub mime: String,
    pub path: PathBuf,
}

impl FileHandle {
    /// Builds a handle from a path on disk, inferring the MIME type from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn from_path(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime = guess_mime(&name).to_string();
        Ok(Self {
            name,
            size,
            mime,
            path,
        })
    }

    /// Overrides the inferred MIME type; blank values are ignored.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        if !mime.trim().is_empty() {
            self.mime = mime.trim().to_ascii_lowercase();
        }
        self
    }

    /// Category implied by the MIME type.
    #[must_use]
    pub fn inferred_category(&self) -> FileCategory {
        FileCategory::from_mime(&self.mime)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// MIME type for a file name, `application/octet-stream` when unknown.
#[must_use]
pub fn guess_mime(name: &str) -> &'static str {
    match extension_of(name).as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "txt" => MIME_TEXT,
        "csv" => MIME_CSV,
        "pdf" => MIME_PDF,
        "docx" => MIME_DOCX,
        "doc" => MIME_DOC,
        _ => "application/octet-stream",
    }
}

/// Extensions offered by the open dialog for `category`.
#[must_use]
pub fn dialog_extensions(category: FileCategory) -> &'static [&'static str] {
    match category {
        FileCategory::Image => &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico"],
        FileCategory::Document => &["pdf", "docx", "doc", "txt", "csv"],
        FileCategory::Audio => &["mp3", "wav", "ogg", "oga", "flac", "m4a"],
        FileCategory::Video => &["mp4", "m4v", "webm", "mkv", "mov", "avi"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dialog_extensions_map_back_to_their_category() {
        for category in FileCategory::ALL {
            for ext in dialog_extensions(category) {
                let mime = guess_mime(&format!("file.{ext}"));
                let inferred = FileCategory::from_mime(mime);
                assert_eq!(inferred, category, "{ext}");
            }
        }
    }

    #[test]
    fn from_path_reads_size_and_mime() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("Report.PDF");
        std::fs::write(&path, b"%PDF-1.7").expect("failed to write file");

        let handle = FileHandle::from_path(&path).expect("handle");
        assert_eq!(handle.name, "Report.PDF");
        assert_eq!(handle.size, 8);
        assert_eq!(handle.mime, MIME_PDF);
        assert_eq!(handle.inferred_category(), FileCategory::Document);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        assert!(FileHandle::from_path(dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn explicit_mime_overrides_extension() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"a,b").expect("failed to write file");

        let handle = FileHandle::from_path(&path).expect("handle").with_mime(" Text/CSV ");
        assert_eq!(handle.mime, MIME_CSV);
        let unchanged = handle.clone().with_mime("  ");
        assert_eq!(unchanged.mime, MIME_CSV);
    }

    #[test]
    fn guess_mime_covers_media() {
        assert_eq!(guess_mime("a.wav"), "audio/wav");
        assert_eq!(guess_mime("a.WEBM"), "video/webm");
        assert_eq!(guess_mime("a"), "application/octet-stream");
    }
}
