// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Preview(PreviewError),
}

/// Failures surfaced while producing a file preview.
///
/// Each variant maps to a localized, user-friendly message through
/// [`PreviewError::i18n_key`]; the carried detail string is only shown
/// when the user asks for details.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewError {
    /// The file could not be read or decoded as text.
    ReadFailure(String),

    /// A single page could not be rasterized.
    RasterizationFailure { page: usize, reason: String },

    /// One conversion tier failed; the next tier is tried.
    ConversionFailure { tier: u8, reason: String },

    /// Every conversion tier failed.
    TerminalFailure(String),

    /// The engine required for this format is not available.
    Unsupported(String),
}

impl PreviewError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            PreviewError::ReadFailure(_) => "error-preview-read",
            PreviewError::RasterizationFailure { .. } => "error-preview-rasterization",
            PreviewError::ConversionFailure { .. } => "error-preview-conversion",
            PreviewError::TerminalFailure(_) => "error-preview-terminal",
            PreviewError::Unsupported(_) => "error-preview-unsupported",
        }
    }

    /// Technical detail for the "show details" panel.
    pub fn detail(&self) -> String {
        match self {
            PreviewError::ReadFailure(msg)
            | PreviewError::TerminalFailure(msg)
            | PreviewError::Unsupported(msg) => msg.clone(),
            PreviewError::RasterizationFailure { page, reason } => {
                format!("page {}: {}", page + 1, reason)
            }
            PreviewError::ConversionFailure { tier, reason } => {
                format!("tier {}: {}", tier, reason)
            }
        }
    }
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::ReadFailure(msg) => write!(f, "Failed to read file: {}", msg),
            PreviewError::RasterizationFailure { page, reason } => {
                write!(f, "Failed to rasterize page {}: {}", page + 1, reason)
            }
            PreviewError::ConversionFailure { tier, reason } => {
                write!(f, "Conversion tier {} failed: {}", tier, reason)
            }
            PreviewError::TerminalFailure(msg) => {
                write!(f, "All conversion methods failed: {}", msg)
            }
            PreviewError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
        }
    }
}

/// Error reported by an external rendering or playback engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError(err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Preview(e) => write!(f, "Preview Error: {}", e),
        }
    }
}

impl From<PreviewError> for Error {
    fn from(err: PreviewError) -> Self {
        Error::Preview(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
