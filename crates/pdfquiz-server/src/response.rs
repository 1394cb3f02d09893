//! JSON response bodies.

use serde::{Deserialize, Serialize};

use pdfquiz_core::{ExtractionMethod, ExtractionResult};

/// Body of a successful extraction response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub text: String,
    pub pages: u32,
    pub info: ExtractInfo,
}

/// Fixed description of how the text was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractInfo {
    pub extracted: bool,
    pub method: ExtractionMethod,
}

impl From<ExtractionResult> for ExtractResponse {
    fn from(result: ExtractionResult) -> Self {
        Self {
            success: result.success,
            text: result.text,
            pages: result.page_count,
            info: ExtractInfo {
                extracted: true,
                method: result.method,
            },
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
