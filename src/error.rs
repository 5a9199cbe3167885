//! Error types for docxgen library.

use std::io;
use thiserror::Error;

/// Result type alias for docxgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building, storing or converting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document file name is empty or has the wrong extension.
    #[error("Invalid file name '{0}': only '.docx' permitted")]
    InvalidFileName(String),

    /// The table configuration violates its invariants.
    #[error("Invalid table configuration: {0}")]
    InvalidTableConfig(String),

    /// A content index maps past the last row of the configured table.
    #[error("Table too small: content index {index} maps to row {row} but table has {row_count} rows")]
    TableOverflow {
        /// Content index that was being written
        index: usize,
        /// Row the index maps to
        row: usize,
        /// Configured number of rows
        row_count: usize,
    },

    /// Picture bytes could not be decoded as a supported image format.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// Picture bytes are not in a format this build decodes.
    #[error("Unsupported picture format: {0}")]
    UnsupportedPicture(String),

    /// Resource not found under the resource root or in a registry.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Error reading or packing a .docx package.
    #[error("DOCX package error: {0}")]
    Docx(String),

    /// Error during format conversion.
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

impl From<docx_rs::ReaderError> for Error {
    fn from(err: docx_rs::ReaderError) -> Self {
        Error::Docx(err.to_string())
    }
}

impl Error {
    /// Whether this error is a configuration error, i.e. one that is
    /// detected before any rendering starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidFileName(_) | Error::InvalidTableConfig(_) | Error::Json(_)
        )
    }
}
