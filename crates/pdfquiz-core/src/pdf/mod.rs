//! PDF text extraction module.

mod extractor;
pub mod patterns;

pub use extractor::{
    estimate_page_count, extract_file, extract_text, normalize_whitespace, unescape_literal,
    BasicTextExtractor,
};

use crate::error::ExtractionError;
use crate::models::extraction::{ExtractionMethod, ExtractionResult};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for text extraction strategies.
pub trait TextExtractor {
    /// Strategy reported alongside extracted text.
    fn method(&self) -> ExtractionMethod;

    /// Extract text and a page estimate from raw document bytes.
    fn extract(&self, data: &[u8]) -> Result<ExtractionResult>;
}
