//! Extraction result model.

use serde::{Deserialize, Serialize};

/// Strategy used to recover text from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMethod {
    /// Literal-string scan over `BT ... ET` text objects.
    #[serde(rename = "basic_text_extraction")]
    Basic,
}

impl ExtractionMethod {
    /// Wire tag for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::Basic => "basic_text_extraction",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text recovered from a single document.
///
/// A successful result always carries non-empty, whitespace-normalized text
/// and a page estimate of at least one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Always `true` for a returned result; failures are reported as errors.
    pub success: bool,
    /// Extracted text, single-space separated and trimmed.
    pub text: String,
    /// Estimated number of pages (>= 1).
    pub page_count: u32,
    /// Strategy that produced the text.
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    /// Number of characters (not bytes) in the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
