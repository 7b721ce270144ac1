// SPDX-License-Identifier: MPL-2.0
//! Preview pipeline.
//!
//! [`loader::load`] is the single entry point the UI calls; it classifies the
//! file and dispatches to PDF rasterization, the word-document conversion
//! chain, or a direct read.

pub mod conversion;
pub mod engines;
pub mod file;
pub mod html_blocks;
pub mod loader;
pub mod object_url;
pub mod pdf;

pub use conversion::{convert_word_document, Converted};
pub use engines::Engines;
pub use file::FileHandle;
pub use loader::{load, LoadOutcome, PreviewRequest};
pub use object_url::ObjectUrlRegistry;
