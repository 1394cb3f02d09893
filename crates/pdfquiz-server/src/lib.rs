//! HTTP boundary for pdfquiz.
//!
//! One route accepts a multipart upload with a `file` field, runs the text
//! extractor on the blocking pool and answers with JSON. Every response,
//! including errors and the `OPTIONS` preflight, carries permissive
//! cross-origin headers.

pub mod error;
pub mod handlers;
pub mod response;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use pdfquiz_core::{BasicTextExtractor, PdfQuizConfig, PdfQuizError, TextExtractor};

pub use error::{ExtractionFailure, FailureReason, ServerError};
pub use response::{ExtractInfo, ExtractResponse, HealthResponse};

/// Room for multipart boundaries and part headers on top of the file limit.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PdfQuizConfig>,
    pub extractor: Arc<dyn TextExtractor + Send + Sync>,
}

/// Build the router with the default extractor.
pub fn router(config: PdfQuizConfig) -> Result<Router, ServerError> {
    router_with_extractor(config, Arc::new(BasicTextExtractor::new()))
}

/// Build the router around a specific extractor.
pub fn router_with_extractor(
    config: PdfQuizConfig,
    extractor: Arc<dyn TextExtractor + Send + Sync>,
) -> Result<Router, ServerError> {
    config.validate()?;
    if config.server.route == "/health" {
        return Err(PdfQuizError::Config("server.route cannot be /health".to_string()).into());
    }

    let allow_origin = header_value("cors.allow_origin", config.cors.allow_origin.clone())?;
    let allow_methods = header_value("cors.allow_methods", config.cors.methods_header())?;
    let allow_headers = header_value("cors.allow_headers", config.cors.headers_header())?;
    let body_limit = config.server.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    let route = config.server.route.clone();

    let state = AppState {
        config: Arc::new(config),
        extractor,
    };

    Ok(Router::new()
        .route(
            &route,
            post(handlers::extract_handler).options(handlers::preflight_handler),
        )
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            allow_origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            allow_methods,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            allow_headers,
        )))
}

fn header_value(name: &'static str, value: String) -> Result<HeaderValue, ServerError> {
    HeaderValue::from_str(&value).map_err(|_| ServerError::InvalidHeader { name, value })
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: PdfQuizConfig) -> Result<(), ServerError> {
    let bind_addr = config.server.bind_addr.clone();
    let route = config.server.route.clone();
    let app = router(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    info!("Listening on {} (POST {})", bind_addr, route);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use pdfquiz_core::{ExtractionMethod, ExtractionResult};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "pdfquiz-test-boundary";
    const ROUTE: &str = "/extract-pdf-text";

    const TWO_PAGE_PDF: &[u8] = b"%PDF-1.4\n\
        1 0 obj << /Type /Pages /Kids [2 0 R 3 0 R] /Count 2 >> endobj\n\
        2 0 obj << /Type /Page /Parent 1 0 R >> endobj\n\
        3 0 obj << /Type /Page /Parent 1 0 R >> endobj\n\
        4 0 obj << /Length 40 >> stream\n\
        BT /F1 12 Tf (Hello) (World) ET\n\
        endstream endobj\n%%EOF\n";

    struct PanickingExtractor;

    impl TextExtractor for PanickingExtractor {
        fn method(&self) -> ExtractionMethod {
            ExtractionMethod::Basic
        }

        fn extract(&self, _data: &[u8]) -> pdfquiz_core::pdf::Result<ExtractionResult> {
            panic!("content stream exploded");
        }
    }

    fn app() -> Router {
        router(PdfQuizConfig::default()).unwrap()
    }

    fn multipart_request(field: &str, file_name: Option<&str>, data: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n\
                     Content-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{field}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(ROUTE)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization, x-client-info, apikey, content-type"
        );
    }

    #[tokio::test]
    async fn test_extract_success() {
        let response = app()
            .oneshot(multipart_request("file", Some("doc.pdf"), TWO_PAGE_PDF))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            json_body(response).await,
            json!({
                "success": true,
                "text": "Hello World",
                "pages": 2,
                "info": { "extracted": true, "method": "basic_text_extraction" }
            })
        );
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let response = app()
            .oneshot(multipart_request("document", Some("doc.pdf"), TWO_PAGE_PDF))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        assert_eq!(json_body(response).await, json!({ "error": "No PDF file provided" }));
    }

    #[tokio::test]
    async fn test_file_field_without_filename() {
        let response = app()
            .oneshot(multipart_request("file", None, b"just a string"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({ "error": "No PDF file provided" }));
    }

    #[tokio::test]
    async fn test_non_multipart_body() {
        let request = Request::builder()
            .method("POST")
            .uri(ROUTE)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        assert_eq!(json_body(response).await, json!({ "error": "No PDF file provided" }));
    }

    #[tokio::test]
    async fn test_no_text_found() {
        let response = app()
            .oneshot(multipart_request(
                "file",
                Some("scan.pdf"),
                b"%PDF-1.4\n<< /Type /Page >>\n%%EOF",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({
                "error": "no text could be extracted; the document may be image-based or encrypted",
                "success": false
            })
        );
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let mut config = PdfQuizConfig::default();
        config.server.max_upload_bytes = 1024;
        let app = router(config).unwrap();

        let data = vec![b'x'; 8 * 1024];
        let response = app
            .oneshot(multipart_request("file", Some("big.pdf"), &data))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "File size must be less than 1MB" })
        );
    }

    #[tokio::test]
    async fn test_upload_at_limit_is_accepted() {
        let config = PdfQuizConfig::default();
        let data = vec![b'x'; config.server.max_upload_bytes];
        let response = router(config)
            .unwrap()
            .oneshot(multipart_request("file", Some("big.pdf"), &data))
            .await
            .unwrap();

        // Passes the size check and reaches the extractor, which finds no text
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_upload_one_byte_over_limit() {
        let config = PdfQuizConfig::default();
        let data = vec![b'x'; config.server.max_upload_bytes + 1];
        let response = router(config)
            .unwrap()
            .oneshot(multipart_request("file", Some("big.pdf"), &data))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "File size must be less than 10MB" })
        );
    }

    #[tokio::test]
    async fn test_body_over_framing_allowance() {
        let mut config = PdfQuizConfig::default();
        config.server.max_upload_bytes = 1024;
        let data = vec![b'x'; 1024 + MULTIPART_OVERHEAD];
        let response = router(config)
            .unwrap()
            .oneshot(multipart_request("file", Some("big.pdf"), &data))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "File size must be less than 1MB" })
        );
    }

    #[tokio::test]
    async fn test_truncated_upload_is_internal_error() {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"doc.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\n\
             %PDF-1.4 BT (Hel"
        );
        let request = Request::builder()
            .method("POST")
            .uri(ROUTE)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to extract text from PDF");
        assert!(body["details"].as_str().unwrap().contains("incomplete"));
    }

    #[tokio::test]
    async fn test_extractor_panic_is_internal_error() {
        let app = router_with_extractor(PdfQuizConfig::default(), Arc::new(PanickingExtractor))
            .unwrap();
        let response = app
            .oneshot(multipart_request("file", Some("doc.pdf"), TWO_PAGE_PDF))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to extract text from PDF");
        assert!(body["details"].as_str().unwrap().contains("panicked"));
    }

    #[tokio::test]
    async fn test_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(ROUTE)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_method_still_has_cors() {
        let request = Request::builder()
            .method("GET")
            .uri(ROUTE)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors(&response);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = PdfQuizConfig::default();
        config.server.route = "no-slash".to_string();
        assert!(matches!(router(config), Err(ServerError::Config(_))));

        let mut config = PdfQuizConfig::default();
        config.cors.allow_origin = "bad\nvalue".to_string();
        assert!(matches!(
            router(config),
            Err(ServerError::InvalidHeader { name: "cors.allow_origin", .. })
        ));
    }
}
