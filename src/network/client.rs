//! HTTP client for search engines and answer pages

use super::transport::{HttpResponse, Transport};
use super::user_agent::{accept_html, generate_user_agent, ACCEPT_LANGUAGE};
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, HttpMethod};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// reqwest wrapper with browser-like defaults
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let timeout = Duration::try_from_secs_f64(settings.request_timeout).with_context(|| {
            format!("Invalid request timeout: {}", settings.request_timeout)
        })?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if !settings.proxies.use_env {
            builder = builder.no_proxy();
        }
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings
                .useragent
                .clone()
                .unwrap_or_else(generate_user_agent),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: EngineRequest) -> Result<HttpResponse> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        req_builder = req_builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_html())
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("DNT", "1");

        for (key, value) in self.extra_headers.iter().chain(request.headers.iter()) {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        if let Some(ref form) = request.form {
            req_builder = req_builder.form(form);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_configured_user_agent() {
        let settings = OutgoingSettings {
            useragent: Some("sourcefetch-test/1.0".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.user_agent(), "sourcefetch-test/1.0");
    }

    #[test]
    fn test_unrepresentable_timeout_is_rejected() {
        for timeout in [f64::INFINITY, f64::NAN, 1e300, -1.0] {
            let settings = OutgoingSettings {
                request_timeout: timeout,
                ..Default::default()
            };
            assert!(HttpClient::with_settings(&settings).is_err(), "{}", timeout);
        }
    }

    #[test]
    fn test_invalid_proxy_is_rejected() {
        let mut settings = OutgoingSettings::default();
        settings.proxies.all = Some("ftp://proxy.invalid:21".to_string());
        assert!(HttpClient::with_settings(&settings).is_err());
    }
}
