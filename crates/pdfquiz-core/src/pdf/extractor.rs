//! Heuristic text extraction over raw PDF bytes.
//!
//! No object graph is built and no streams are decompressed. The decoded
//! bytes are scanned for `BT ... ET` text objects and the literal string
//! operands inside them, which covers uncompressed content streams written
//! with simple single-byte fonts.

use std::borrow::Cow;
use std::path::Path;

use tracing::{debug, info};

use super::patterns::{is_whitespace, LITERAL_STRING, PAGE_MARKER, TEXT_OBJECT};
use super::{Result, TextExtractor};
use crate::error::ExtractionError;
use crate::models::extraction::{ExtractionMethod, ExtractionResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Stateless extractor backed by [`extract_text`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTextExtractor;

impl BasicTextExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for BasicTextExtractor {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::Basic
    }

    fn extract(&self, data: &[u8]) -> Result<ExtractionResult> {
        extract_text(data)
    }
}

/// Extract text and a page estimate from raw PDF bytes.
///
/// Fails only with [`ExtractionError::NoTextFound`]; malformed input degrades
/// into garbled text instead of an error.
pub fn extract_text(data: &[u8]) -> Result<ExtractionResult> {
    info!("Extracting text from {} bytes", data.len());

    let decoded = decode(data);

    let mut buffer = String::new();
    let (spans, literals) = collect_literals(&decoded, &mut buffer);
    debug!("Scanned {} text objects, {} literal strings", spans, literals);

    let text = normalize_whitespace(&buffer);
    let page_count = estimate_page_count(&decoded);

    info!(
        "Extracted {} characters, estimated {} pages",
        text.chars().count(),
        page_count
    );

    if text.is_empty() {
        return Err(ExtractionError::NoTextFound);
    }

    Ok(ExtractionResult {
        success: true,
        text,
        page_count,
        method: ExtractionMethod::Basic,
    })
}

/// Read a file from disk and run [`extract_text`] over its contents.
pub fn extract_file(path: &Path) -> crate::Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(extract_text(&data)?)
}

/// Decode bytes as UTF-8, replacing invalid sequences and dropping a BOM.
fn decode(data: &[u8]) -> Cow<'_, str> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    String::from_utf8_lossy(data)
}

/// Append every literal inside every text object to `buffer`, each followed
/// by a space. Returns the number of text objects and literals seen.
fn collect_literals(decoded: &str, buffer: &mut String) -> (usize, usize) {
    let mut spans = 0;
    let mut literals = 0;

    for object in TEXT_OBJECT.find_iter(decoded) {
        spans += 1;
        for caps in LITERAL_STRING.captures_iter(object.as_str()) {
            literals += 1;
            let raw = caps.get(1).map_or("", |m| m.as_str());
            buffer.push_str(&unescape_literal(raw));
            buffer.push(' ');
        }
    }

    (spans, literals)
}

/// Resolve the escape sequences of a literal string body.
///
/// Substitutions run one after another over the whole string, so the output
/// of an earlier one can feed a later one (`\\(` becomes `(`).
pub fn unescape_literal(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(
        raw.replace(r"\n", "\n")
            .replace(r"\r", "\r")
            .replace(r"\t", "\t")
            .replace(r"\\", "\\")
            .replace(r"\(", "(")
            .replace(r"\)", ")"),
    )
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for word in text.split(is_whitespace).filter(|word| !word.is_empty()) {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Count `/Type /Page` markers, never reporting fewer than one page.
pub fn estimate_page_count(decoded: &str) -> u32 {
    match PAGE_MARKER.find_iter(decoded).count() {
        0 => 1,
        n => u32::try_from(n).unwrap_or(u32::MAX),
    }
}
