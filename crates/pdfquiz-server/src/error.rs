//! Error types for the HTTP boundary.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use pdfquiz_core::{ExtractionError, PdfQuizError};

/// Message returned when the request carries no usable `file` field.
pub const NO_FILE_MESSAGE: &str = "No PDF file provided";

/// Message returned for unexpected failures; details travel separately.
pub const INTERNAL_MESSAGE: &str = "Failed to extract text from PDF";

/// Errors raised while building or running the server.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The configuration cannot be served.
    #[error(transparent)]
    Config(#[from] PdfQuizError),

    /// A configured header value is not a valid HTTP header value.
    #[error("invalid header value for {name}: {value:?}")]
    InvalidHeader { name: &'static str, value: String },

    /// Binding the listener failed.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Why an extraction request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    /// The request had no `file` field carrying a file.
    NoFileProvided,
    /// The document yielded no text.
    NoTextFound,
    /// The upload exceeded the configured body limit.
    FileTooLarge,
    /// Anything unexpected while reading the upload or extracting.
    InternalError,
}

impl FailureReason {
    /// HTTP status reported for this reason.
    pub fn status(&self) -> StatusCode {
        match self {
            FailureReason::NoFileProvided | FailureReason::NoTextFound => StatusCode::BAD_REQUEST,
            FailureReason::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            FailureReason::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed extraction request, rendered as a JSON error body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExtractionFailure {
    pub reason: FailureReason,
    pub message: String,
    pub details: Option<String>,
}

impl ExtractionFailure {
    pub fn no_file() -> Self {
        Self {
            reason: FailureReason::NoFileProvided,
            message: NO_FILE_MESSAGE.to_string(),
            details: None,
        }
    }

    pub fn too_large(max_megabytes: usize) -> Self {
        Self {
            reason: FailureReason::FileTooLarge,
            message: format!("File size must be less than {}MB", max_megabytes),
            details: None,
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            reason: FailureReason::InternalError,
            message: INTERNAL_MESSAGE.to_string(),
            details: Some(details.into()),
        }
    }

    /// Map a multipart read error; body-limit overflows become `FileTooLarge`.
    pub fn from_multipart(err: MultipartError, max_megabytes: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::too_large(max_megabytes)
        } else {
            Self::internal(err.body_text())
        }
    }
}

impl From<ExtractionError> for ExtractionFailure {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NoTextFound => Self {
                reason: FailureReason::NoTextFound,
                message: err.to_string(),
                details: None,
            },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for ExtractionFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            success: match self.reason {
                FailureReason::NoTextFound => Some(false),
                _ => None,
            },
            details: match self.reason {
                FailureReason::InternalError => {
                    Some(self.details.as_deref().unwrap_or("Unknown error"))
                }
                _ => None,
            },
        };
        (self.reason.status(), Json(body)).into_response()
    }
}
