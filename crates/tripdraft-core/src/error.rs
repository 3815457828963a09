//! Error types for the tripdraft-core library.

use thiserror::Error;

/// Main error type for the tripdraft library.
///
/// Only document parsing and configuration handling can fail. Missing or
/// unparseable receipt fields are represented as absent values on the
/// draft, never as errors.
#[derive(Error, Debug)]
pub enum TripdraftError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The bytes could not be parsed as a PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and the empty password does not open it.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the tripdraft library.
pub type Result<T> = std::result::Result<T, TripdraftError>;
