//! Core library for pdfquiz.
//!
//! This crate provides:
//! - Heuristic text extraction from raw PDF bytes (`BT ... ET` literal scan)
//! - Page-count estimation from page object markers
//! - Result, error and configuration types shared by the server and CLI

pub mod error;
pub mod models;
pub mod pdf;

pub use error::{ExtractionError, PdfQuizError, Result};
pub use models::config::PdfQuizConfig;
pub use models::extraction::{ExtractionMethod, ExtractionResult};
pub use pdf::{extract_file, extract_text, BasicTextExtractor, TextExtractor};
