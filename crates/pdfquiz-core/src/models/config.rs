//! Configuration structures for the extraction service.

use serde::{Deserialize, Serialize};

use crate::error::PdfQuizError;

/// Environment variable overriding `server.bind_addr`.
pub const BIND_ENV_VAR: &str = "PDFQUIZ_BIND";

/// Main configuration for pdfquiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfQuizConfig {
    /// HTTP server configuration.
    pub server: ServerConfig,

    /// Cross-origin header configuration.
    pub cors: CorsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,

    /// Route serving the extraction endpoint.
    pub route: String,

    /// Largest accepted upload body in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            route: "/extract-pdf-text".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Headers attached to every response so browsers on any origin can call in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: String,

    /// Methods listed in `Access-Control-Allow-Methods`.
    pub allow_methods: Vec<String>,

    /// Headers listed in `Access-Control-Allow-Headers`.
    pub allow_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: vec!["POST".to_string(), "OPTIONS".to_string()],
            allow_headers: vec![
                "authorization".to_string(),
                "x-client-info".to_string(),
                "apikey".to_string(),
                "content-type".to_string(),
            ],
        }
    }
}

impl PdfQuizConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(bind) = std::env::var(BIND_ENV_VAR) {
            if !bind.is_empty() {
                self.server.bind_addr = bind;
            }
        }
        self
    }

    /// Check that the configuration can be served.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.server.route.starts_with('/') {
            return Err(PdfQuizError::Config(format!(
                "server.route must start with '/': {}",
                self.server.route
            )));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(PdfQuizError::Config(
                "server.max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if !has_host_and_port(&self.server.bind_addr) {
            return Err(PdfQuizError::Config(format!(
                "server.bind_addr must be host:port: {}",
                self.server.bind_addr
            )));
        }
        Ok(())
    }
}

/// Accept `host:port` without resolving the host, so names like `localhost`
/// are left to the listener.
fn has_host_and_port(addr: &str) -> bool {
    match addr.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

impl ServerConfig {
    /// Upload limit rendered in whole megabytes, for user-facing messages.
    pub fn max_upload_megabytes(&self) -> usize {
        self.max_upload_bytes.div_ceil(1024 * 1024)
    }
}

impl CorsConfig {
    /// Comma-separated `Access-Control-Allow-Methods` value.
    pub fn methods_header(&self) -> String {
        self.allow_methods.join(", ")
    }

    /// Comma-separated `Access-Control-Allow-Headers` value.
    pub fn headers_header(&self) -> String {
        self.allow_headers.join(", ")
    }
}
