//! Error types for the pdfquiz-core library.

use thiserror::Error;

/// Main error type for the pdfquiz library.
#[derive(Error, Debug)]
pub enum PdfQuizError {
    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors produced by the text extractor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Scanning finished without recovering any text.
    #[error("no text could be extracted; the document may be image-based or encrypted")]
    NoTextFound,
}

/// Result type for the pdfquiz library.
pub type Result<T> = std::result::Result<T, PdfQuizError>;
