/*!
 * Error types for the subshift application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while parsing, adjusting or persisting subtitles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// A line does not match the grammar expected at its position
    #[error("Format error at line {line}: {message}")]
    Format {
        /// 1-based line number in the input (0 when parsing a lone timestamp)
        line: usize,
        /// What was expected
        message: String,
    },

    /// The file could not be opened, read or written
    #[error("I/O error on {path}: {message}")]
    Io {
        /// Path of the file involved
        path: String,
        /// Underlying error message
        message: String,
    },

    /// The encoding label is not known to the file layer
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// A timing operation referenced a subtitle number that is not in the document
    #[error("Subtitle {0} does not exist")]
    NotFound(u32),

    /// A proportional shift was anchored at the first record, leaving nothing to taper
    #[error("Subtitle {0} is the first subtitle and cannot anchor a proportional shift")]
    AnchorIsFirst(u32),

    /// Load or save was requested before a file path was set
    #[error("No file selected")]
    NoSourcePath,
}

impl SubtitleError {
    /// Build a format error for the given line
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Build an I/O error for the given path
    pub fn io(path: impl AsRef<std::path::Path>, error: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            message: error.to_string(),
        }
    }

    /// Whether this error belongs to the I/O class (file access or encoding)
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::UnsupportedEncoding(_))
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

// Utility functions for error conversion
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
