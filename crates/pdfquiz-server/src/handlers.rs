//! Request handlers.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{error, info, warn};

use pdfquiz_core::models::config::ServerConfig;

use crate::error::ExtractionFailure;
use crate::response::{ExtractResponse, HealthResponse};
use crate::AppState;

/// Name of the multipart field carrying the document.
pub const FILE_FIELD: &str = "file";

struct Upload {
    file_name: String,
    data: Bytes,
}

// POST <route>
pub async fn extract_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResponse>, ExtractionFailure> {
    info!("Starting PDF text extraction");

    let mut multipart = multipart.map_err(|rejection| {
        warn!("Request is not a multipart upload: {}", rejection);
        ExtractionFailure::no_file()
    })?;

    let upload = read_file_field(&mut multipart, &state.config.server).await?;
    info!(
        "Processing PDF file: {}, size: {} bytes",
        upload.file_name,
        upload.data.len()
    );

    let extractor = state.extractor.clone();
    let result = tokio::task::spawn_blocking(move || extractor.extract(&upload.data))
        .await
        .map_err(|e| {
            error!("Extraction task failed: {}", e);
            ExtractionFailure::internal(e.to_string())
        })?
        .map_err(|e| {
            warn!("{}", e);
            ExtractionFailure::from(e)
        })?;

    info!(
        "Successfully extracted {} characters, estimated {} pages",
        result.char_count(),
        result.page_count
    );

    Ok(Json(ExtractResponse::from(result)))
}

/// Find the first `file` field and read it, requiring a filename so plain
/// form values are not mistaken for uploads.
///
/// The size limit applies to the file contents, not the multipart framing.
async fn read_file_field(
    multipart: &mut Multipart,
    server: &ServerConfig,
) -> Result<Upload, ExtractionFailure> {
    let max_megabytes = server.max_upload_megabytes();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ExtractionFailure::from_multipart(e, max_megabytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let Some(file_name) = field.file_name().map(str::to_string) else {
            warn!("Field '{}' is not a file upload", FILE_FIELD);
            return Err(ExtractionFailure::no_file());
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| ExtractionFailure::from_multipart(e, max_megabytes))?;

        if data.len() > server.max_upload_bytes {
            warn!(
                "File {} is {} bytes, limit is {}",
                file_name,
                data.len(),
                server.max_upload_bytes
            );
            return Err(ExtractionFailure::too_large(max_megabytes));
        }

        return Ok(Upload { file_name, data });
    }

    warn!("No file provided");
    Err(ExtractionFailure::no_file())
}

// OPTIONS <route>
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
