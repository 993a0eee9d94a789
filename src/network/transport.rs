//! Transport abstraction shared by the searcher and the fetcher

use crate::engines::EngineRequest;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// HTTP response as seen by engines and the fetcher
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl HttpResponse {
    /// Bare response with a status and a body
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            text: text.into(),
            url: String::new(),
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the response is exactly 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Check if response indicates CAPTCHA
    pub fn is_captcha(&self) -> bool {
        self.text.contains("captcha")
            || self.text.contains("CAPTCHA")
            || self.text.contains("unusual traffic")
            || self.text.contains("automated requests")
    }
}

/// Something that can carry an [`EngineRequest`] over the wire.
///
/// Transport errors (DNS, TLS, connection reset, timeout) are `Err`; any
/// HTTP status, including 4xx/5xx, comes back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request
    async fn execute(&self, request: EngineRequest) -> Result<HttpResponse>;

    /// Simple GET request
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.execute(EngineRequest::get(url)).await
    }
}
